//! Named-operation surface called by the host ledger.
//!
//! A host transaction carries an operation name and a list of string
//! arguments; [`invoke`] routes it to the [`CustodyLedger`] and returns the
//! payload the host hands back to its client.

use serde_json::Value;
use tracing::debug;

use crate::error::LedgerError;
use crate::ledger::CustodyLedger;

/// Successful result of an operation.
#[derive(Clone, Debug, PartialEq)]
pub enum Response {
    Empty,
    Json(Value),
    Text(String),
}

impl Response {
    /// Payload bytes as returned to the host.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Response::Empty => Vec::new(),
            Response::Json(value) => value.to_string().into_bytes(),
            Response::Text(text) => text.into_bytes(),
        }
    }
}

/// Run the operation `name` with `args`.
pub fn invoke(ledger: &CustodyLedger, name: &str, args: &[String]) -> Result<Response, LedgerError> {
    debug!(operation = name, args = args.len(), "invoke");
    match name {
        "initLedger" => {
            ledger.bootstrap()?;
            Ok(Response::Empty)
        }
        "recordContainer" => {
            let [id, description, location, holder] = expect_args::<4>(args)?;
            ledger.record_asset(id, description, location, holder)?;
            Ok(Response::Empty)
        }
        "queryContainer" => {
            let [id] = expect_args::<1>(args)?;
            Ok(Response::Json(serde_json::to_value(ledger.query_asset(id)?)?))
        }
        "queryAllContainers" => Ok(Response::Json(serde_json::to_value(
            ledger.query_all_assets()?,
        )?)),
        "changeContainerHolder" => {
            let [id, holder] = expect_args::<2>(args)?;
            Ok(Response::Text(ledger.transfer_custody(id, holder)?.to_string()))
        }
        "auditContainer" => {
            let [id] = expect_args::<1>(args)?;
            Ok(Response::Json(serde_json::to_value(ledger.audit_asset(id)?)?))
        }
        other => Err(LedgerError::InvalidOperation(other.to_string())),
    }
}

fn expect_args<const N: usize>(args: &[String]) -> Result<[&str; N], LedgerError> {
    let args: &[String; N] = args.try_into().map_err(|_| {
        LedgerError::InvalidArgument(format!(
            "incorrect number of arguments, expecting {N}, got {}",
            args.len()
        ))
    })?;
    Ok(args.each_ref().map(String::as_str))
}
