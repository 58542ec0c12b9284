use anyhow::Result;
use calgrid_core::session::Session;

use crate::context::sign_in_hint;

pub fn run() -> Result<()> {
    let session = Session::load().map_err(sign_in_hint)?;
    println!("{} <{}>", session.user.name, session.user.email);
    Ok(())
}
