//! Frontend handlers for the Star Notary page.
//!
//! The page has a mint form (`starName`, `starId`), a lookup form
//! (`lookId`) and a single `status` line. Field values arrive as raw
//! strings; the handlers parse them, call the contract through a
//! [`StarNotaryClient`], and replace the status line with the outcome.

use star_notary_common::{
    errors::{StarNotaryError, StarNotaryResult},
    types::{Address, QueryResult, StarAction, StarId, StarQuery},
};

use crate::chain::DevChain;

/// Logged when the app cannot reach the contract during start-up
pub const CONNECT_ERROR: &str = "Could not connect to contract or chain.";

/// Contract methods the page needs
pub trait StarNotaryClient {
    /// Accounts available to sign calls
    fn accounts(&self) -> StarNotaryResult<Vec<Address>>;

    /// Mint a star owned by `from`
    fn create_star(&mut self, from: &Address, name: &str, star_id: StarId) -> StarNotaryResult<()>;

    /// Registered name of a star
    fn get_registry_entry(&self, star_id: StarId) -> StarNotaryResult<String>;
}

impl StarNotaryClient for DevChain {
    fn accounts(&self) -> StarNotaryResult<Vec<Address>> {
        Ok(DevChain::accounts(self).to_vec())
    }

    fn create_star(&mut self, from: &Address, name: &str, star_id: StarId) -> StarNotaryResult<()> {
        let action = StarAction::CreateStar {
            name: name.to_string(),
            star_id,
        };
        self.send(from, 0, action).map(|_| ())
    }

    fn get_registry_entry(&self, star_id: StarId) -> StarNotaryResult<String> {
        match self.call(&StarQuery::GetRegistryEntry { star_id })? {
            QueryResult::Text(name) => Ok(name),
            _ => Err(StarNotaryError::InvalidCallData),
        }
    }
}

/// Page state bound to a deployed contract
pub struct NotaryApp<C> {
    client: C,
    account: Option<Address>,
    status: String,
    console: Vec<String>,
}

impl<C: StarNotaryClient> NotaryApp<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            account: None,
            status: String::new(),
            console: Vec::new(),
        }
    }

    /// Select the first available account as the signer
    pub fn start(&mut self) {
        match self.client.accounts() {
            Ok(accounts) if !accounts.is_empty() => self.account = Some(accounts[0]),
            _ => self.console.push(CONNECT_ERROR.to_string()),
        }
    }

    /// Handler for the mint form
    pub fn create_star(&mut self, star_name: &str, star_id: &str) -> StarNotaryResult<()> {
        let account = self.account.ok_or(StarNotaryError::NotConnected)?;
        let star_id = parse_star_id(star_id, "starId")?;

        self.client.create_star(&account, star_name, star_id)?;
        self.set_status(format!("New star owner is {}.", to_hex(&account)));
        Ok(())
    }

    /// Handler for the lookup form
    pub fn look_up(&mut self, look_id: &str) -> StarNotaryResult<()> {
        let star_id = parse_star_id(look_id, "lookId")?;

        let star_name = self.client.get_registry_entry(star_id)?;
        self.set_status(format!("Star name is {}.", star_name));
        Ok(())
    }

    pub fn set_status(&mut self, message: String) {
        self.status = message;
    }

    /// Current content of the status line
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn account(&self) -> Option<Address> {
        self.account
    }

    /// Messages logged to the developer console
    pub fn console(&self) -> &[String] {
        &self.console
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

fn parse_star_id(field: &str, param: &'static str) -> StarNotaryResult<StarId> {
    let field = field.trim();
    if field.is_empty() {
        return Err(StarNotaryError::InvalidInput {
            param,
            reason: "empty value",
        });
    }
    field.parse::<StarId>().map_err(|_| StarNotaryError::InvalidInput {
        param,
        reason: "not a star id",
    })
}

/// Render an address as 0x-prefixed lowercase hex
pub fn to_hex(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Client with no accounts, as when no wallet or node is reachable
    struct Offline;

    impl StarNotaryClient for Offline {
        fn accounts(&self) -> StarNotaryResult<Vec<Address>> {
            Err(StarNotaryError::NotConnected)
        }

        fn create_star(&mut self, _: &Address, _: &str, _: StarId) -> StarNotaryResult<()> {
            Err(StarNotaryError::NotConnected)
        }

        fn get_registry_entry(&self, _: StarId) -> StarNotaryResult<String> {
            Err(StarNotaryError::NotConnected)
        }
    }

    fn started_app() -> NotaryApp<DevChain> {
        let chain = DevChain::with_dev_accounts("Rinkeby Star Tokens", "RST").unwrap();
        let mut app = NotaryApp::new(chain);
        app.start();
        app
    }

    #[test]
    fn test_start_selects_first_account() {
        let app = started_app();
        assert_eq!(app.account(), Some(app.client().accounts()[0]));
        assert!(app.console().is_empty());
    }

    #[test]
    fn test_start_offline_logs_error() {
        let mut app = NotaryApp::new(Offline);
        app.start();
        assert_eq!(app.account(), None);
        assert_eq!(app.console().to_vec(), vec![CONNECT_ERROR.to_string()]);
        assert_eq!(app.create_star("Vega", "1"), Err(StarNotaryError::NotConnected));
    }

    #[test]
    fn test_create_star_sets_status() {
        let mut app = started_app();
        app.create_star("Betelgeuse", "12").unwrap();

        let owner = app.account().unwrap();
        assert_eq!(app.status(), format!("New star owner is {}.", to_hex(&owner)));
        assert_eq!(app.client().contract().owner_of(12).unwrap(), owner);
    }

    #[test]
    fn test_look_up_sets_status() {
        let mut app = started_app();
        app.create_star("Betelgeuse", "12").unwrap();
        app.look_up(" 12 ").unwrap();
        assert_eq!(app.status(), "Star name is Betelgeuse.");
    }

    #[test]
    fn test_bad_fields_leave_status_untouched() {
        let mut app = started_app();
        app.set_status("ready".into());

        assert!(matches!(
            app.create_star("Vega", "twelve"),
            Err(StarNotaryError::InvalidInput { param: "starId", .. })
        ));
        assert!(matches!(
            app.look_up(""),
            Err(StarNotaryError::InvalidInput { param: "lookId", .. })
        ));
        assert_eq!(
            app.look_up("99"),
            Err(StarNotaryError::StarNotFound { star_id: 99 })
        );
        assert_eq!(app.status(), "ready");
    }

    #[test]
    fn test_to_hex() {
        let mut address = [0u8; 32];
        address[0] = 0xab;
        address[31] = 0x01;
        let hex = to_hex(&address);
        assert_eq!(hex.len(), 66);
        assert!(hex.starts_with("0xab00"));
        assert!(hex.ends_with("01"));
    }
}
