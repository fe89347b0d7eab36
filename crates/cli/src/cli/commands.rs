use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bindings")]
#[command(about = "Inspect and exercise the ownership and economy Move packages", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Override the network (devnet, testnet, mainnet or localnet)
    #[arg(long, global = true, env = "SUI_CHAIN")]
    pub chain: Option<String>,

    /// Explicit fullnode gRPC URL
    #[arg(long, global = true, env = "SUI_RPC_URL")]
    pub rpc_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch an object and print it decoded through the struct class loader
    Object {
        /// Object ID
        object: String,

        /// Print the node's JSON view instead of decoding the BCS
        #[arg(long)]
        raw: bool,
    },

    /// Print the Move events emitted by a transaction
    Events {
        /// Transaction digest
        digest: String,
    },

    /// List every struct type the class loader can decode
    Types,

    /// Encode a JSON record field by field
    Encode {
        /// Schema as `name:type,name:type`
        #[arg(long)]
        schema: String,

        /// JSON object to encode
        #[arg(long)]
        value: String,

        /// Comma separated subset of fields
        #[arg(long, value_delimiter = ',')]
        keys: Option<Vec<String>>,
    },

    /// Decode hex encoded fields back to JSON
    Decode {
        #[arg(long)]
        schema: String,

        /// Comma separated hex values, one per selected field
        #[arg(long, value_delimiter = ',')]
        fields: Vec<String>,

        #[arg(long, value_delimiter = ',')]
        keys: Option<Vec<String>>,
    },

    /// Check a JSON record against a schema
    Validate {
        #[arg(long)]
        schema: String,

        #[arg(long)]
        value: String,
    },

    /// Generate a new ed25519 keypair
    Keypair,

    /// Outlaw demo: create, delegate, edit and verify
    Demo {
        #[command(subcommand)]
        command: DemoCommands,
    },

    /// coin23 account ledger calls
    Coin23 {
        #[command(subcommand)]
        command: Coin23Commands,
    },
}

#[derive(Subcommand)]
pub enum DemoCommands {
    /// Create and share an outlaw owned by the signer
    Create {
        #[arg(long, default_value = "Billy the Kid")]
        name: String,

        #[arg(long, default_value = "https://example.com/outlaw.png")]
        image_url: String,
    },

    /// Create a delegation store granting EDITOR to an agent
    Delegate {
        /// Agent address
        #[arg(long)]
        agent: String,
    },

    /// Rename an outlaw as the agent, using a delegation
    Edit {
        #[arg(long)]
        outlaw: String,

        #[arg(long)]
        store: String,

        #[arg(long)]
        new_name: String,

        #[command(flatten)]
        agent: AgentKey,
    },

    /// Fetch an outlaw and check its name
    Verify {
        #[arg(long)]
        outlaw: String,

        #[arg(long)]
        name: String,
    },

    /// Run the whole flow end to end
    Run {
        #[arg(long, default_value = "Billy the Kid")]
        name: String,

        #[arg(long, default_value = "William Bonney")]
        new_name: String,

        #[command(flatten)]
        agent: AgentKey,
    },
}

#[derive(Args)]
pub struct AgentKey {
    /// Secret key of the agent
    #[arg(long = "agent-key", env = "AGENT_SECRET_KEY")]
    pub secret_key: String,
}

#[derive(Subcommand)]
pub enum Coin23Commands {
    /// Create a coin23 account for the signer
    Create {
        #[arg(long, default_value = "0x2::sui::SUI")]
        coin_type: String,
    },

    /// Deposit from the gas coin into an account
    Deposit {
        #[arg(long)]
        account: String,

        /// Amount in MIST
        #[arg(long)]
        amount: u64,

        #[arg(long, default_value = "0x2::sui::SUI")]
        coin_type: String,
    },

    /// Transfer between two accounts
    Transfer {
        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        #[arg(long)]
        amount: u64,

        #[arg(long, env = "COIN23_REGISTRY")]
        registry: String,

        #[arg(long, default_value = "0x2::sui::SUI")]
        coin_type: String,
    },

    /// Freeze or unfreeze an account
    Freeze {
        #[arg(long)]
        account: String,

        #[arg(long, env = "COIN23_REGISTRY")]
        registry: String,

        #[arg(long)]
        unfreeze: bool,

        #[arg(long, default_value = "0x2::sui::SUI")]
        coin_type: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_encode_keys() {
        let cli = Cli::try_parse_from([
            "bindings",
            "encode",
            "--schema",
            "name:string,age:u8",
            "--value",
            r#"{"name":"Alice","age":30}"#,
            "--keys",
            "age,name",
        ])
        .unwrap();
        match cli.command {
            Commands::Encode { keys, .. } => {
                assert_eq!(keys, Some(vec!["age".to_string(), "name".to_string()]))
            }
            _ => panic!("expected encode"),
        }
    }

    #[test]
    fn test_parse_demo_edit() {
        let cli = Cli::try_parse_from([
            "bindings",
            "--chain",
            "devnet",
            "demo",
            "edit",
            "--outlaw",
            "0x1",
            "--store",
            "0x2",
            "--new-name",
            "Kid",
            "--agent-key",
            "suiprivkey1xyz",
        ])
        .unwrap();
        assert_eq!(cli.chain.as_deref(), Some("devnet"));
        assert!(matches!(
            cli.command,
            Commands::Demo {
                command: DemoCommands::Edit { .. }
            }
        ));
    }
}
