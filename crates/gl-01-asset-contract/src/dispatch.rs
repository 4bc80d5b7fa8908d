//! # Wire Dispatcher
//!
//! Maps ledger invocations `(function, args)` onto [`GarmentTransferApi`]
//! calls. Arguments are positional strings; results travel back as the
//! payload of a [`ChaincodeResponse`].

use ledger_telemetry::CONTRACT_INVOCATIONS;
use shared_types::ChaincodeResponse;
use tracing::{debug, warn};

use crate::errors::ContractError;
use crate::ports::GarmentTransferApi;

/// Wire-level function names.
pub mod functions {
    pub const INIT_LEDGER: &str = "InitLedger";
    pub const CREATE_GARMENT: &str = "CreateGarment";
    pub const READ_GARMENT: &str = "ReadGarment";
    pub const UPDATE_GARMENT: &str = "UpdateGarment";
    pub const DELETE_GARMENT: &str = "DeleteGarment";
    pub const GARMENT_EXISTS: &str = "GarmentExists";
    pub const TRANSFER_GARMENT: &str = "TransferGarment";
    pub const GET_ALL_GARMENTS: &str = "GetAllGarments";

    pub const ALL: [&str; 8] = [
        INIT_LEDGER,
        CREATE_GARMENT,
        READ_GARMENT,
        UPDATE_GARMENT,
        DELETE_GARMENT,
        GARMENT_EXISTS,
        TRANSFER_GARMENT,
        GET_ALL_GARMENTS,
    ];
}

/// Invoke `function` with positional `args` and wrap the outcome.
pub async fn invoke<C>(contract: &C, function: &str, args: &[String]) -> ChaincodeResponse
where
    C: GarmentTransferApi + ?Sized,
{
    let label = if functions::ALL.iter().any(|name| *name == function) {
        function
    } else {
        "unknown"
    };

    match execute(contract, function, args).await {
        Ok(payload) => {
            CONTRACT_INVOCATIONS.with_label_values(&[label, "ok"]).inc();
            debug!(function, payload_len = payload.len(), "invocation succeeded");
            ChaincodeResponse::success(payload)
        }
        Err(e) if e.is_precondition_failure() => {
            CONTRACT_INVOCATIONS
                .with_label_values(&[label, "rejected"])
                .inc();
            debug!(function, error = %e, "invocation rejected");
            ChaincodeResponse::error(e.to_string())
        }
        Err(e) => {
            CONTRACT_INVOCATIONS.with_label_values(&[label, "error"]).inc();
            warn!(function, error = %e, "invocation failed");
            ChaincodeResponse::error(e.to_string())
        }
    }
}

async fn execute<C>(contract: &C, function: &str, args: &[String]) -> Result<Vec<u8>, ContractError>
where
    C: GarmentTransferApi + ?Sized,
{
    use functions::*;

    let payload = match function {
        INIT_LEDGER => {
            arity(function, args, 0)?;
            contract.init_ledger().await?;
            String::new()
        }
        CREATE_GARMENT => {
            arity(function, args, 5)?;
            contract
                .create_garment(&args[0], &args[1], &args[2], &args[3], &args[4])
                .await?
        }
        READ_GARMENT => {
            arity(function, args, 1)?;
            contract.read_garment(&args[0]).await?
        }
        UPDATE_GARMENT => {
            arity(function, args, 5)?;
            contract
                .update_garment(&args[0], &args[1], &args[2], &args[3], &args[4])
                .await?;
            String::new()
        }
        DELETE_GARMENT => {
            arity(function, args, 1)?;
            contract.delete_garment(&args[0]).await?;
            String::new()
        }
        GARMENT_EXISTS => {
            arity(function, args, 1)?;
            contract.garment_exists(&args[0]).await?.to_string()
        }
        TRANSFER_GARMENT => {
            arity(function, args, 2)?;
            contract.transfer_garment(&args[0], &args[1]).await?
        }
        GET_ALL_GARMENTS => {
            arity(function, args, 0)?;
            contract.get_all_garments().await?
        }
        other => return Err(ContractError::UnknownFunction(other.to_string())),
    };
    Ok(payload.into_bytes())
}

fn arity(function: &str, args: &[String], expected: usize) -> Result<(), ContractError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(ContractError::InvalidArguments {
            function: function.to_string(),
            expected,
            actual: args.len(),
        })
    }
}
