use sui_client::Signer;

use crate::error::Result;

pub fn handle_keypair_command() -> Result<()> {
    let (signer, secret_key) = Signer::generate()?;

    println!("🔑 New Sui Ed25519 keypair\n");
    println!("🔐 PRIVATE KEY (keep this secret):");
    println!("   {}\n", secret_key);
    println!("📍 ADDRESS:");
    println!("   {}\n", signer.address);
    println!("💡 To use this keypair:");
    println!("   export SUI_SECRET_KEY={}", secret_key);
    println!("   export SUI_ADDRESS={}", signer.address);
    Ok(())
}
