use crate::change::{ChangeAction, TwinChange};
use crate::error::Error;
use crate::output::Output;
use rmp::encode::buffer::ByteBuf;
use rmp::encode::{write_str, write_uint, ValueWriteError};
use std::convert::Infallible;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// MessagePack output for change records
pub struct MessagePack;

impl Output for MessagePack {
    async fn write<T: AsyncWrite + Unpin>(
        &self,
        writer: &mut T,
        change: TwinChange,
    ) -> Result<(), Error> {
        let mut buffer = ByteBuf::with_capacity(4096);
        write_header(&change, &mut buffer)?;
        write_optional_fields(&change, &mut buffer)?;

        writer.write_all(buffer.as_slice()).await?;
        Ok(())
    }
}

impl From<ValueWriteError<Infallible>> for Error {
    fn from(_value: ValueWriteError<Infallible>) -> Self {
        Error::OutputError
    }
}

fn kind_to_byte(change: &TwinChange) -> u8 {
    match change {
        TwinChange::Thing(_) => 1,
        TwinChange::Feature(_) => 2,
        TwinChange::Features(_) => 3,
    }
}

fn action_to_byte(action: ChangeAction) -> u8 {
    match action {
        ChangeAction::Created => 1,
        ChangeAction::Updated => 2,
        ChangeAction::Merged => 3,
        ChangeAction::Deleted => 4,
    }
}

fn write_header(change: &TwinChange, buffer: &mut ByteBuf) -> Result<(), Error> {
    let record = change.change();

    write_uint(buffer, kind_to_byte(change) as u64)?;
    write_uint(buffer, action_to_byte(record.action()) as u64)?;
    write_str(buffer, record.thing_id().as_str())?;
    write_str(buffer, &record.path().to_string())?;
    write_uint(buffer, record.revision())?;
    Ok(())
}

fn write_optional_fields(change: &TwinChange, buffer: &mut ByteBuf) -> Result<(), Error> {
    let record = change.change();

    match record.timestamp() {
        Some(timestamp) => {
            write_uint(buffer, 1)?;
            write_uint(buffer, timestamp)?;
        }
        None => {
            write_uint(buffer, 0)?;
        }
    }

    match record.value() {
        Some(value) => {
            write_uint(buffer, 1)?;
            write_str(buffer, &serde_json::to_string(value)?)?;
        }
        None => {
            write_uint(buffer, 0)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::{Change, FeatureChange};
    use crate::model::{Feature, Pointer, ThingId};
    use serde_json::json;
    use std::io::Cursor;

    #[derive(Debug, PartialEq)]
    struct ExpectedValue(Vec<u8>);

    impl ExpectedValue {
        fn new(value: &'static [u8]) -> Self {
            Self(value.into())
        }
    }

    impl From<Vec<u8>> for ExpectedValue {
        fn from(value: Vec<u8>) -> Self {
            Self(value)
        }
    }

    #[tokio::test]
    async fn encodes_thing_change_without_optional_fields() {
        output_test!(
            MessagePack,
            TwinChange::Thing(Change::new(
                ThingId::new("ns:item"),
                ChangeAction::Created,
                Pointer::parse("/attributes").unwrap(),
                None,
                5,
                None,
            )),
            ExpectedValue::new(b"\x01\x01\xa7ns:item\xab/attributes\x05\x00\x00")
        );
    }

    #[tokio::test]
    async fn encodes_thing_change_with_timestamp_and_value() {
        output_test!(
            MessagePack,
            TwinChange::Thing(Change::new(
                ThingId::new("ns:item"),
                ChangeAction::Updated,
                Pointer::parse("/state").unwrap(),
                Some(json!({"on": true})),
                9,
                Some(10),
            )),
            ExpectedValue::new(b"\x01\x02\xa7ns:item\xa6/state\x09\x01\x0a\x01\xab{\"on\":true}")
        );
    }

    #[tokio::test]
    async fn encodes_feature_change_with_derived_value() {
        output_test!(
            MessagePack,
            TwinChange::Feature(FeatureChange::new(
                ThingId::new("ns:item"),
                ChangeAction::Created,
                Some(Feature::new("lamp").with_properties(json!({"on": true}))),
                Pointer::parse("/features/lamp").unwrap(),
                3,
                None,
            )),
            ExpectedValue::new(
                b"\x02\x01\xa7ns:item\xae/features/lamp\x03\x00\x01\xba{\"properties\":{\"on\":true}}"
            )
        );
    }

    #[tokio::test]
    async fn encodes_deleted_feature_without_value() {
        output_test!(
            MessagePack,
            TwinChange::Feature(FeatureChange::new(
                ThingId::new("ns:item"),
                ChangeAction::Deleted,
                None,
                Pointer::parse("/features/lamp").unwrap(),
                8,
                None,
            )),
            ExpectedValue::new(b"\x02\x04\xa7ns:item\xae/features/lamp\x08\x00\x00")
        );
    }
}
