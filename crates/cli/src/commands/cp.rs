//! cp pipeline - Copy one object
//!
//! Copies a single object between the local filesystem and the store.
//! Arguments are validated before the store is touched.

use h3cp_core::{Error, ObjectStore, Stage, StoreTarget, Transfer, TransferRequest, copy};
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::Formatter;

#[derive(Debug, Serialize)]
struct CpOutput {
    status: &'static str,
    operation: &'static str,
    bucket: String,
    key: String,
    file: String,
    size_bytes: u64,
    size_human: String,
}

/// Validate the positional arguments, then run one transfer against the store
pub fn execute<S: ObjectStore>(
    store: &S,
    target: StoreTarget,
    paths: &[String],
    formatter: &Formatter,
    usage: &str,
) -> ExitCode {
    tracing::debug!(stage = %Stage::Start, args = paths.len());

    let request = match TransferRequest::from_args(paths) {
        Ok(r) => r,
        Err(e) => {
            formatter.error(&e.to_string());
            if matches!(e, Error::Usage(_)) {
                formatter.usage(usage);
            }
            return ExitCode::from_error(&e);
        }
    };
    tracing::debug!(
        stage = %Stage::Parsed,
        source = %request.source(),
        destination = %request.destination()
    );

    match &target {
        StoreTarget::ConfigFile(path) => {
            formatter.info(&format!("Using configuration file: {}", path.display()))
        }
        StoreTarget::Uri(uri) => formatter.info(&format!("Using storage URI: {uri}")),
    }
    match request.transfer() {
        Transfer::Download { bucket, key, file } => formatter.info(&format!(
            "Read {key} from {bucket} into {}",
            file.display()
        )),
        Transfer::Upload { bucket, key, file } => formatter.info(&format!(
            "Write {} to {key} into {bucket}",
            file.display()
        )),
    }

    match copy(store, &target, &request) {
        Ok(outcome) => {
            let size_human = humansize::format_size(outcome.bytes, humansize::BINARY);
            let transfer = &outcome.transfer;
            if formatter.is_json() {
                formatter.json(&CpOutput {
                    status: "success",
                    operation: if transfer.is_download() {
                        "download"
                    } else {
                        "upload"
                    },
                    bucket: transfer.bucket().to_string(),
                    key: transfer.key().to_string(),
                    file: transfer.file().display().to_string(),
                    size_bytes: outcome.bytes,
                    size_human,
                });
            } else {
                formatter.success(&format!(
                    "{} -> {} ({size_human})",
                    request.source(),
                    request.destination()
                ));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::from_error(&e)
        }
    }
}
