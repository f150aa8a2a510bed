//! Command parsing and dispatch

use anyhow::Result;
use myaussie_client::Session;
use serde_json::Value;
use tracing::debug;

use crate::error::Error;

/// Recognised command names, in help order.
pub const COMMANDS: &[&str] = &[
    "customer",
    "usage",
    "transactions",
    "outages",
    "tests",
    "logout",
];

/// One invocation of the binary.
///
/// Service-scoped commands take an optional service ID; without one they
/// use the first NBN service on the account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Customer,
    Usage(Option<i64>),
    Transactions,
    Outages(Option<i64>),
    Tests(Option<i64>),
    Logout,
}

impl Command {
    /// Parse positional arguments (flags already removed).
    pub fn parse(args: &[String]) -> crate::error::Result<Self> {
        let Some(name) = args.first() else {
            return Err(Error::MissingCommand);
        };
        let service_id = args
            .get(1)
            .map(|raw| {
                raw.parse::<i64>()
                    .map_err(|_| Error::InvalidServiceId(raw.clone()))
            })
            .transpose()?;

        match name.as_str() {
            "customer" => Ok(Command::Customer),
            "usage" => Ok(Command::Usage(service_id)),
            "transactions" => Ok(Command::Transactions),
            "outages" => Ok(Command::Outages(service_id)),
            "tests" => Ok(Command::Tests(service_id)),
            "logout" => Ok(Command::Logout),
            other => Err(Error::UnknownCommand(other.to_string())),
        }
    }

    pub fn needs_session(&self) -> bool {
        !matches!(self, Command::Logout)
    }
}

/// Run a session command and return its result as JSON.
pub async fn run(session: &Session, command: &Command) -> Result<Value> {
    let value = match command {
        Command::Customer => serde_json::to_value(session.customer_details().await?)?,
        Command::Usage(id) => {
            let id = service_id(session, *id).await?;
            serde_json::to_value(session.usage(id).await?)?
        }
        Command::Transactions => serde_json::to_value(session.transactions().await?)?,
        Command::Outages(id) => {
            let id = service_id(session, *id).await?;
            serde_json::to_value(session.nbn_outages(id).await?)?
        }
        Command::Tests(id) => {
            let id = service_id(session, *id).await?;
            serde_json::to_value(session.tests(id).await?)?
        }
        Command::Logout => Value::Null,
    };
    Ok(value)
}

async fn service_id(session: &Session, explicit: Option<i64>) -> Result<i64> {
    if let Some(id) = explicit {
        return Ok(id);
    }
    let details = session.customer_details().await?;
    let service = details.services.nbn.first().ok_or(Error::NoServices)?;
    debug!(service_id = service.service_id, "defaulting to first NBN service");
    Ok(service.service_id)
}
