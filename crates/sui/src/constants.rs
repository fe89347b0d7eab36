// Gas budget configuration
// 1 SUI = 1,000,000,000 MIST

/// Budget used for the dry run, large enough for any call the bindings issue (5 SUI)
pub const SIMULATION_GAS_BUDGET_MIST: u64 = 5_000_000_000;

/// Minimum gas budget for any transaction (0.005 SUI)
pub const MIN_GAS_BUDGET_MIST: u64 = 5_000_000;

/// Maximum gas budget for any transaction (0.1 SUI)
pub const MAX_GAS_BUDGET_MIST: u64 = 500_000_000;

/// Dry run multiplier applied to the simulated gas usage
pub const GAS_BUFFER_MULTIPLIER: u64 = 2;

// Locking

/// Timeout for object locks (in seconds)
pub const OBJECT_LOCK_TIMEOUT_SECS: u64 = 120;

/// Timeout for gas coin locks (in seconds)
pub const COIN_LOCK_TIMEOUT_SECS: u64 = 60;

// Execution

/// Retries for version conflicts and unavailable fullnodes
pub const MAX_EXECUTION_RETRIES: u32 = 3;

/// How long to poll for an executed transaction to become readable
pub const TRANSACTION_WAIT_MS: u64 = 5_000;

// Well-known objects and types

pub const CLOCK_OBJECT_ID: &str =
    "0x0000000000000000000000000000000000000000000000000000000000000006";

pub const SUI_COIN_TYPE: &str = "0x2::coin::Coin<0x2::sui::SUI>";

pub const MIST_PER_SUI: f64 = 1_000_000_000.0;
