use anyhow::Result;
use calgrid_core::session::Session;

pub fn run() -> Result<()> {
    Session::clear()?;
    println!("Signed out");
    Ok(())
}
