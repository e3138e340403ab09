//! Terminal business operations
//!
//! Placeholders for real services. Each one records what it did and returns a
//! plain string that the surrounding pipeline publishes.

use tracing::info;

pub const EMAIL_DOMAIN: &str = "lexmark.com";

/// Create a mailbox for `first.last`
pub fn create_email((first_name, last_name): (String, String)) -> String {
    let address = format!("{first_name}.{last_name}@{EMAIL_DOMAIN}");
    info!("Email Created: {address}");
    address
}

/// Decorate a message for broadcast to every department
pub fn announcement(message: String) -> String {
    info!("An important announcement has been sent to all departments!");
    format!("{message}!")
}

/// Remove a mailbox
pub fn delete_email(address: String) -> String {
    info!("Email Deleted: {address}");
    format!("Email {address} deleted.")
}
