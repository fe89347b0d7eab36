//! The outlaw demo: the owner creates an outlaw and delegates `EDITOR` to an
//! agent, the agent renames it through the delegation, and the result is
//! read back from chain.

use bindings::demo::outlaw::{self, EDITOR, Outlaw};
use bindings::ownership::delegation::{self, DelegationStore};
use bindings::ownership::tx_authority;
use bindings::{Address, MoveStruct, type_arg};
use sui_client::{ExecuteOptions, Signer, TransactionBlockResult, execute_move_calls};
use tracing::info;

use crate::cli::{AgentKey, DemoCommands};
use crate::error::{CliError, Result};

pub async fn handle_demo_command(
    command: DemoCommands,
    rpc_url: Option<String>,
    chain_override: Option<String>,
) -> Result<()> {
    match command {
        DemoCommands::Create { name, image_url } => {
            let owner = super::connect_with_signer(rpc_url, chain_override, None).await?;
            let outlaw_id = create_outlaw(&owner, &name, &image_url).await?;
            println!("Outlaw: {}", outlaw_id);
        }
        DemoCommands::Delegate { agent } => {
            let owner = super::connect_with_signer(rpc_url, chain_override, None).await?;
            let agent: Address = agent
                .parse()
                .map_err(|e| CliError::InvalidInput(format!("bad agent address: {}", e)))?;
            let store_id = delegate_editor(&owner, agent).await?;
            println!("DelegationStore: {}", store_id);
        }
        DemoCommands::Edit {
            outlaw,
            store,
            new_name,
            agent,
        } => {
            let agent = agent_signer(&agent)?;
            super::connect_read_only(rpc_url, chain_override).await?;
            let result = rename_as_agent(&agent, &outlaw, &store, &new_name).await?;
            println!("Renamed in {}", result.digest);
        }
        DemoCommands::Verify { outlaw, name } => {
            super::connect_read_only(rpc_url, chain_override).await?;
            let outlaw = verify_name(&outlaw, &name).await?;
            println!("{}", serde_json::to_string_pretty(&outlaw.to_json()?)?);
        }
        DemoCommands::Run {
            name,
            new_name,
            agent,
        } => {
            let owner = super::connect_with_signer(rpc_url, chain_override, None).await?;
            let agent = agent_signer(&agent)?;
            run(&owner, &agent, &name, &new_name).await?;
        }
    }
    Ok(())
}

fn agent_signer(agent: &AgentKey) -> Result<Signer> {
    Signer::from_secret_key(&agent.secret_key)
        .map_err(|e| CliError::ConfigError(format!("bad agent key: {}", e)))
}

fn created_id<T: MoveStruct>(result: &TransactionBlockResult) -> Result<String> {
    result
        .find_created(T::is_type)
        .map(|o| o.object_id.clone())
        .ok_or_else(|| {
            CliError::Other(anyhow::anyhow!(
                "transaction {} created no {}",
                result.digest,
                T::NAME
            ))
        })
}

pub async fn create_outlaw(owner: &Signer, name: &str, image_url: &str) -> Result<String> {
    info!("Creating outlaw '{}' owned by {}", name, owner.address);
    let result = execute_move_calls(
        owner,
        &[],
        |tb, _| {
            let auth = tx_authority::begin(tb)?;
            let created = outlaw::create(
                tb,
                outlaw::CreateArgs {
                    name: name.to_string(),
                    image_url: image_url.to_string(),
                    auth,
                },
            )?;
            outlaw::return_and_share(tb, created)?;
            Ok(())
        },
        ExecuteOptions::labeled("outlaw::create"),
    )
    .await?;
    created_id::<Outlaw>(&result)
}

pub async fn delegate_editor(owner: &Signer, agent: Address) -> Result<String> {
    info!("Delegating EDITOR from {} to {}", owner.address, agent);
    let result = execute_move_calls(
        owner,
        &[],
        |tb, _| {
            let auth = tx_authority::begin(tb)?;
            let store = delegation::create(tb, auth)?;
            delegation::add_permission(
                tb,
                &type_arg::<EDITOR>(),
                delegation::AddPermissionArgs { store, agent, auth },
            )?;
            delegation::return_and_share(tb, store)?;
            Ok(())
        },
        ExecuteOptions::labeled("delegation::add_permission"),
    )
    .await?;
    created_id::<DelegationStore>(&result)
}

pub async fn rename_as_agent(
    agent: &Signer,
    outlaw_id: &str,
    store_id: &str,
    new_name: &str,
) -> Result<TransactionBlockResult> {
    info!("Agent {} renaming {} to '{}'", agent.address, outlaw_id, new_name);
    let result = execute_move_calls(
        agent,
        &[store_id.to_string(), outlaw_id.to_string()],
        |tb, objects| {
            let auth = delegation::claim_delegation(tb, objects[0])?;
            outlaw::rename(
                tb,
                outlaw::RenameArgs {
                    outlaw: objects[1],
                    new_name: new_name.to_string(),
                    auth,
                },
            )?;
            Ok(())
        },
        ExecuteOptions::labeled("outlaw::rename"),
    )
    .await?;
    Ok(result)
}

pub async fn verify_name(outlaw_id: &str, expected: &str) -> Result<Outlaw> {
    let outlaw: Outlaw = bindings::fetch(outlaw_id).await?;
    if outlaw.name != expected {
        return Err(CliError::VerificationFailed {
            expected: expected.to_string(),
            found: outlaw.name,
        });
    }
    info!("Outlaw {} is named '{}'", outlaw_id, outlaw.name);
    Ok(outlaw)
}

async fn run(owner: &Signer, agent: &Signer, name: &str, new_name: &str) -> Result<()> {
    let outlaw_id = create_outlaw(owner, name, "https://example.com/outlaw.png").await?;
    verify_name(&outlaw_id, name).await?;

    let store_id = delegate_editor(owner, agent.address.into()).await?;
    let store: DelegationStore = bindings::fetch(&store_id).await?;
    let granted = store.permissions_of(&agent.address.into());
    if !granted.iter().any(|p| p.inner.name.ends_with("::outlaw::EDITOR")) {
        return Err(CliError::VerificationFailed {
            expected: "EDITOR delegated to agent".to_string(),
            found: format!("{} permissions", granted.len()),
        });
    }

    rename_as_agent(agent, &outlaw_id, &store_id, new_name).await?;
    let outlaw = verify_name(&outlaw_id, new_name).await?;

    println!("Outlaw:          {}", outlaw_id);
    println!("DelegationStore: {}", store_id);
    println!("Name:            {} -> {}", name, outlaw.name);
    Ok(())
}
