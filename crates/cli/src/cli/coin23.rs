use bindings::args;
use bindings::economy::coin23::{self, Coin23};
use bindings::ownership::tx_authority;
use bindings::{Address, MoveStruct};
use sui_client::{ExecuteOptions, Signer, execute_move_calls};
use sui_sdk_types::Argument;
use tracing::info;

use crate::cli::Coin23Commands;
use crate::error::{CliError, Result};

pub async fn handle_coin23_command(
    command: Coin23Commands,
    rpc_url: Option<String>,
    chain_override: Option<String>,
) -> Result<()> {
    let signer = super::connect_with_signer(rpc_url, chain_override, None).await?;
    match command {
        Coin23Commands::Create { coin_type } => {
            let account = create_account(&signer, &coin_type).await?;
            println!("Coin23 account: {}", account);
        }
        Coin23Commands::Deposit {
            account,
            amount,
            coin_type,
        } => {
            deposit(&signer, &account, amount, &coin_type).await?;
            let updated: Coin23 = bindings::fetch(&account).await?;
            println!("Available: {} MIST", updated.available.value);
        }
        Coin23Commands::Transfer {
            from,
            to,
            amount,
            registry,
            coin_type,
        } => {
            let label = "coin23::transfer";
            let result = execute_move_calls(
                &signer,
                &[from, to, registry],
                |tb, objects| {
                    let auth = tx_authority::begin(tb)?;
                    coin23::transfer(
                        tb,
                        &coin_type,
                        coin23::TransferArgs {
                            from: objects[0],
                            to: objects[1],
                            amount,
                            registry: objects[2],
                            auth,
                        },
                    )?;
                    Ok(())
                },
                ExecuteOptions::labeled(label),
            )
            .await?;
            println!("Transferred {} MIST in {}", amount, result.digest);
        }
        Coin23Commands::Freeze {
            account,
            registry,
            unfreeze,
            coin_type,
        } => {
            let label = if unfreeze { "coin23::unfreeze" } else { "coin23::freeze_" };
            let result = execute_move_calls(
                &signer,
                &[account.clone(), registry],
                |tb, objects| {
                    let auth = tx_authority::begin(tb)?;
                    let freeze_args = coin23::FreezeArgs {
                        account: objects[0],
                        registry: objects[1],
                        auth,
                    };
                    if unfreeze {
                        coin23::unfreeze(tb, &coin_type, freeze_args)?;
                    } else {
                        coin23::freeze_(tb, &coin_type, freeze_args)?;
                    }
                    Ok(())
                },
                ExecuteOptions::labeled(label),
            )
            .await?;
            let updated: Coin23 = bindings::fetch(&account).await?;
            println!("{} frozen={} ({})", account, updated.frozen, result.digest);
        }
    }
    Ok(())
}

pub async fn create_account(signer: &Signer, coin_type: &str) -> Result<String> {
    let owner: Address = signer.address.into();
    info!("Creating Coin23<{}> account for {}", coin_type, owner);
    let result = execute_move_calls(
        signer,
        &[],
        |tb, _| {
            let account = coin23::create(tb, coin_type)?;
            coin23::return_and_share(tb, coin_type, coin23::ReturnAndShareArgs { account, owner })?;
            Ok(())
        },
        ExecuteOptions::labeled("coin23::create"),
    )
    .await?;
    result
        .find_created(Coin23::is_type)
        .map(|o| o.object_id.clone())
        .ok_or_else(|| CliError::Other(anyhow::anyhow!("{} created no account", result.digest)))
}

/// Split `amount` off the gas coin and deposit it.
pub async fn deposit(signer: &Signer, account: &str, amount: u64, coin_type: &str) -> Result<()> {
    info!("Depositing {} MIST into {}", amount, account);
    execute_move_calls(
        signer,
        &[account.to_string()],
        |tb, objects| {
            let amount_arg = args::pure(tb, &amount);
            let coins = tb.split_coins(Argument::Gas, vec![amount_arg]);
            coin23::deposit_from_coin(
                tb,
                coin_type,
                coin23::DepositFromCoinArgs {
                    account: objects[0],
                    coin: args::nested(coins, 0),
                },
            )?;
            Ok(())
        },
        ExecuteOptions::labeled("coin23::deposit_from_coin"),
    )
    .await?;
    Ok(())
}
