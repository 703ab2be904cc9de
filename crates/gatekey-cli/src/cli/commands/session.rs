//! Session command handlers (status, logout).

use anyhow::Result;
use gatekey_core::session::SessionStore;

pub fn status(store: &SessionStore) -> Result<()> {
    if !store.is_authenticated() {
        println!("Not signed in.");
        return Ok(());
    }

    println!("Signed in.");
    if let Some(user) = store.user() {
        if let Some(name) = user.get("name").and_then(|v| v.as_str()) {
            println!("Name:  {name}");
        }
        if let Some(email) = user.get("email").and_then(|v| v.as_str()) {
            println!("Email: {email}");
        }
    }
    Ok(())
}

pub fn logout(store: &SessionStore) -> Result<()> {
    if store.is_authenticated() {
        store.clear()?;
        println!("Signed out.");
    } else {
        println!("No active session.");
    }
    Ok(())
}
