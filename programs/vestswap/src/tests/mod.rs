
use anchor_lang::{prelude::*, system_program, InstructionData};
use anchor_spl::token::spl_token;

use crate::constants::{
    ESCROW_SEED, ESCROW_VAULT_SEED, MARKET_SEED, POOL_SEED, SHARE_MINT_SEED, SWAP_SEED,
    VAULT_A_SEED, VAULT_B_SEED,
};

type Instruction = anchor_lang::solana_program::instruction::Instruction;

pub struct InstructionBuilder;

impl InstructionBuilder {
    pub fn escrow_pda(lender: &Pubkey, borrower: &Pubkey, mint: &Pubkey, seed: u64) -> Pubkey {
        Pubkey::find_program_address(
            &[
                ESCROW_SEED,
                lender.as_ref(),
                borrower.as_ref(),
                mint.as_ref(),
                &seed.to_le_bytes(),
            ],
            &crate::id(),
        )
        .0
    }

    pub fn escrow_vault_pda(escrow: &Pubkey) -> Pubkey {
        Pubkey::find_program_address(&[ESCROW_VAULT_SEED, escrow.as_ref()], &crate::id()).0
    }

    pub fn pool_pda(mint_a: &Pubkey, mint_b: &Pubkey) -> Pubkey {
        Pubkey::find_program_address(&[POOL_SEED, mint_a.as_ref(), mint_b.as_ref()], &crate::id()).0
    }

    pub fn share_mint_pda(pool: &Pubkey) -> Pubkey {
        Pubkey::find_program_address(&[SHARE_MINT_SEED, pool.as_ref()], &crate::id()).0
    }

    pub fn swap_pda(mint_a: &Pubkey, mint_b: &Pubkey) -> Pubkey {
        Pubkey::find_program_address(&[SWAP_SEED, mint_a.as_ref(), mint_b.as_ref()], &crate::id()).0
    }

    pub fn market_pda(mint_a: &Pubkey, mint_b: &Pubkey) -> Pubkey {
        Pubkey::find_program_address(&[MARKET_SEED, mint_a.as_ref(), mint_b.as_ref()], &crate::id())
            .0
    }

    /// Reserve vault pair of a pool, desk or market account
    pub fn vault_pdas(owner: &Pubkey) -> (Pubkey, Pubkey) {
        let program_id = crate::id();
        let (vault_a, _) =
            Pubkey::find_program_address(&[VAULT_A_SEED, owner.as_ref()], &program_id);
        let (vault_b, _) =
            Pubkey::find_program_address(&[VAULT_B_SEED, owner.as_ref()], &program_id);
        (vault_a, vault_b)
    }

    pub fn escrow_fund(
        lender: &Pubkey,
        lender_token: &Pubkey,
        borrower: &Pubkey,
        mint: &Pubkey,
        seed: u64,
        total_amount: u64,
        total_steps: u64,
    ) -> (Instruction, Pubkey) {
        let program_id = crate::id();
        let escrow = Self::escrow_pda(lender, borrower, mint, seed);
        let (vault, _) =
            Pubkey::find_program_address(&[ESCROW_VAULT_SEED, escrow.as_ref()], &program_id);

        let accounts = crate::accounts::EscrowFund {
            escrow,
            vault,
            mint: *mint,
            borrower: *borrower,
            lender_token: *lender_token,
            lender: *lender,
            token_program: spl_token::ID,
            system_program: system_program::ID,
            rent: anchor_lang::solana_program::sysvar::rent::ID,
        };

        let instruction = Instruction {
            program_id,
            accounts: accounts.to_account_metas(None),
            data: crate::instruction::EscrowFund {
                seed,
                total_amount,
                total_steps,
            }
            .data(),
        };

        (instruction, escrow)
    }

    pub fn pool_initialize(payer: &Pubkey, mint_a: &Pubkey, mint_b: &Pubkey) -> (Instruction, Pubkey) {
        let program_id = crate::id();
        let (pool, _) = Pubkey::find_program_address(
            &[POOL_SEED, mint_a.as_ref(), mint_b.as_ref()],
            &program_id,
        );
        let (vault_a, vault_b) = Self::vault_pdas(&pool);
        let (share_mint, _) =
            Pubkey::find_program_address(&[SHARE_MINT_SEED, pool.as_ref()], &program_id);

        let accounts = crate::accounts::PoolInitialize {
            pool,
            mint_a: *mint_a,
            mint_b: *mint_b,
            vault_a,
            vault_b,
            share_mint,
            payer: *payer,
            token_program: spl_token::ID,
            system_program: system_program::ID,
            rent: anchor_lang::solana_program::sysvar::rent::ID,
        };

        let instruction = Instruction {
            program_id,
            accounts: accounts.to_account_metas(None),
            data: crate::instruction::PoolInitialize {}.data(),
        };

        (instruction, pool)
    }

    pub fn swap_initialize(
        payer: &Pubkey,
        mint_a: &Pubkey,
        mint_b: &Pubkey,
        fixed_price: Option<u128>,
    ) -> (Instruction, Pubkey) {
        let program_id = crate::id();
        let (desk, _) = Pubkey::find_program_address(
            &[SWAP_SEED, mint_a.as_ref(), mint_b.as_ref()],
            &program_id,
        );
        let (vault_a, vault_b) = Self::vault_pdas(&desk);

        let accounts = crate::accounts::SwapInitialize {
            desk,
            mint_a: *mint_a,
            mint_b: *mint_b,
            vault_a,
            vault_b,
            payer: *payer,
            token_program: spl_token::ID,
            system_program: system_program::ID,
            rent: anchor_lang::solana_program::sysvar::rent::ID,
        };

        let instruction = Instruction {
            program_id,
            accounts: accounts.to_account_metas(None),
            data: crate::instruction::SwapInitialize { fixed_price }.data(),
        };

        (instruction, desk)
    }

    pub fn market_set_fee_percentage(
        market_mint_a: &Pubkey,
        market_mint_b: &Pubkey,
        caller: &Pubkey,
        fee_percentage: u8,
    ) -> (Instruction, Pubkey) {
        let program_id = crate::id();
        let (market, _) = Pubkey::find_program_address(
            &[MARKET_SEED, market_mint_a.as_ref(), market_mint_b.as_ref()],
            &program_id,
        );

        let accounts = crate::accounts::MarketAdmin {
            market,
            caller: *caller,
        };

        let instruction = Instruction {
            program_id,
            accounts: accounts.to_account_metas(None),
            data: crate::instruction::MarketSetFeePercentage { fee_percentage }.data(),
        };

        (instruction, market)
    }

    pub fn escrow_withdraw(
        escrow: &Pubkey,
        borrower: &Pubkey,
        borrower_token: &Pubkey,
    ) -> Instruction {
        let accounts = crate::accounts::EscrowWithdraw {
            escrow: *escrow,
            vault: Self::escrow_vault_pda(escrow),
            borrower_token: *borrower_token,
            borrower: *borrower,
            token_program: spl_token::ID,
        };

        Instruction {
            program_id: crate::id(),
            accounts: accounts.to_account_metas(None),
            data: crate::instruction::EscrowWithdraw {}.data(),
        }
    }

    fn pool_liquidity(
        pool: &Pubkey,
        user: &LiquidityUser,
        data: Vec<u8>,
    ) -> Instruction {
        let (vault_a, vault_b) = Self::vault_pdas(pool);
        let accounts = crate::accounts::PoolLiquidity {
            pool: *pool,
            vault_a,
            vault_b,
            share_mint: Self::share_mint_pda(pool),
            user_token_a: user.token_a,
            user_token_b: user.token_b,
            user_shares: user.shares,
            user: user.wallet,
            token_program: spl_token::ID,
        };

        Instruction {
            program_id: crate::id(),
            accounts: accounts.to_account_metas(None),
            data,
        }
    }

    pub fn pool_init_fund(
        pool: &Pubkey,
        user: &LiquidityUser,
        amount_a: u64,
        amount_b: u64,
    ) -> Instruction {
        let data = crate::instruction::PoolInitFund { amount_a, amount_b }.data();
        Self::pool_liquidity(pool, user, data)
    }

    pub fn pool_fund(pool: &Pubkey, user: &LiquidityUser, amount_a: u64) -> Instruction {
        let data = crate::instruction::PoolFund { amount_a }.data();
        Self::pool_liquidity(pool, user, data)
    }

    pub fn pool_withdraw(pool: &Pubkey, user: &LiquidityUser, share_amount: u64) -> Instruction {
        let data = crate::instruction::PoolWithdraw { share_amount }.data();
        Self::pool_liquidity(pool, user, data)
    }

    pub fn pool_price(pool: &Pubkey) -> Instruction {
        let (vault_a, vault_b) = Self::vault_pdas(pool);
        let accounts = crate::accounts::PoolPrice {
            pool: *pool,
            vault_a,
            vault_b,
        };

        Instruction {
            program_id: crate::id(),
            accounts: accounts.to_account_metas(None),
            data: crate::instruction::PoolPrice {}.data(),
        }
    }

    pub fn swap_quote_to_base(
        desk: &Pubkey,
        user: &Pubkey,
        user_token_a: &Pubkey,
        user_token_b: &Pubkey,
        amount_out: u64,
    ) -> Instruction {
        let (vault_a, vault_b) = Self::vault_pdas(desk);
        let accounts = crate::accounts::SwapQuoteToBase {
            desk: *desk,
            vault_a,
            vault_b,
            user_token_a: *user_token_a,
            user_token_b: *user_token_b,
            user: *user,
            token_program: spl_token::ID,
        };

        Instruction {
            program_id: crate::id(),
            accounts: accounts.to_account_metas(None),
            data: crate::instruction::SwapQuoteToBase { amount_out }.data(),
        }
    }

    pub fn market_initialize(owner: &Pubkey, mint_a: &Pubkey, mint_b: &Pubkey) -> (Instruction, Pubkey) {
        let market = Self::market_pda(mint_a, mint_b);
        let (vault_a, vault_b) = Self::vault_pdas(&market);

        let accounts = crate::accounts::MarketInitialize {
            market,
            mint_a: *mint_a,
            mint_b: *mint_b,
            vault_a,
            vault_b,
            owner: *owner,
            token_program: spl_token::ID,
            system_program: system_program::ID,
            rent: anchor_lang::solana_program::sysvar::rent::ID,
        };

        let instruction = Instruction {
            program_id: crate::id(),
            accounts: accounts.to_account_metas(None),
            data: crate::instruction::MarketInitialize {}.data(),
        };

        (instruction, market)
    }

    pub fn market_fund(
        market: &Pubkey,
        funder: &Pubkey,
        funder_token_a: &Pubkey,
        funder_token_b: &Pubkey,
        amount_a: u64,
        amount_b: u64,
    ) -> Instruction {
        let (vault_a, vault_b) = Self::vault_pdas(market);
        let accounts = crate::accounts::MarketFund {
            market: *market,
            vault_a,
            vault_b,
            funder_token_a: *funder_token_a,
            funder_token_b: *funder_token_b,
            funder: *funder,
            token_program: spl_token::ID,
        };

        Instruction {
            program_id: crate::id(),
            accounts: accounts.to_account_metas(None),
            data: crate::instruction::MarketFund { amount_a, amount_b }.data(),
        }
    }

    fn market_trade(market: &Pubkey, trade: &TradeAccounts, data: Vec<u8>) -> Instruction {
        let (vault_a, vault_b) = Self::vault_pdas(market);
        let accounts = crate::accounts::MarketTrade {
            market: *market,
            vault_a,
            vault_b,
            user_token_a: trade.user_token_a,
            user_token_b: trade.user_token_b,
            owner_token_a: trade.owner_token_a,
            owner_token_b: trade.owner_token_b,
            user: trade.user,
            token_program: spl_token::ID,
        };

        Instruction {
            program_id: crate::id(),
            accounts: accounts.to_account_metas(None),
            data,
        }
    }

    pub fn market_buy(market: &Pubkey, trade: &TradeAccounts, amount_a: u64) -> Instruction {
        let data = crate::instruction::MarketBuy { amount_a }.data();
        Self::market_trade(market, trade, data)
    }

    pub fn market_sell(market: &Pubkey, trade: &TradeAccounts, amount_a: u64) -> Instruction {
        let data = crate::instruction::MarketSell { amount_a }.data();
        Self::market_trade(market, trade, data)
    }

    pub fn market_transfer_ownership(
        market: &Pubkey,
        caller: &Pubkey,
        new_owner: &Pubkey,
    ) -> Instruction {
        let accounts = crate::accounts::MarketAdmin {
            market: *market,
            caller: *caller,
        };

        Instruction {
            program_id: crate::id(),
            accounts: accounts.to_account_metas(None),
            data: crate::instruction::MarketTransferOwnership {
                new_owner: *new_owner,
            }
            .data(),
        }
    }
}

/// Wallet and token accounts of a liquidity provider
pub struct LiquidityUser {
    pub wallet: Pubkey,
    pub token_a: Pubkey,
    pub token_b: Pubkey,
    pub shares: Pubkey,
}

/// Trader accounts plus the owner accounts that collect fees
pub struct TradeAccounts {
    pub user: Pubkey,
    pub user_token_a: Pubkey,
    pub user_token_b: Pubkey,
    pub owner_token_a: Pubkey,
    pub owner_token_b: Pubkey,
}
