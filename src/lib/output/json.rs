use crate::change::TwinChange;
use crate::error::Error;
use crate::output::Output;

use serde_json::{json, to_vec, Value};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// JSON lines output for change records
pub struct JsonOutput;

fn kind_to_str(change: &TwinChange) -> &'static str {
    match change {
        TwinChange::Thing(_) => "thing",
        TwinChange::Feature(_) => "feature",
        TwinChange::Features(_) => "features",
    }
}

impl Output for JsonOutput {
    async fn write<T: AsyncWrite + Unpin>(
        &self,
        writer: &mut T,
        change: TwinChange,
    ) -> Result<(), Error> {
        let record = change.change();

        let mut json_object = json!({
            "type": kind_to_str(&change),
            "thingId": record.thing_id().as_str(),
            "action": record.action().as_str(),
            "path": record.path().to_string(),
            "revision": record.revision(),
        });

        if let Some(timestamp) = record.timestamp() {
            populate_key(&mut json_object, "timestamp", timestamp)?;
        }

        if let Some(value) = record.value() {
            populate_key(&mut json_object, "value", value.clone())?;
        }

        writer.write_all(&to_vec(&json_object)?).await?;
        writer.write_all(b"\n").await?;

        Ok(())
    }
}

fn populate_key(json: &mut Value, key: &str, value: impl Into<Value>) -> Result<(), Error> {
    json.as_object_mut()
        .ok_or(Error::OutputError)?
        .insert(key.to_owned(), value.into());

    Ok(())
}
