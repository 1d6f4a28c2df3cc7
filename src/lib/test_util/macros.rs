#[macro_export]
macro_rules! pointer {
    ($path:expr) => {
        $crate::model::Pointer::parse($path).unwrap()
    };
}

#[macro_export]
macro_rules! envelope {
    ($thing_id:expr, $action:ident, $path:expr, $revision:expr) => {
        $crate::event::EventEnvelope::new(
            $crate::model::ThingId::new($thing_id),
            $crate::change::ChangeAction::$action,
            $crate::model::Pointer::parse($path).unwrap(),
            None,
            $revision,
            None,
        )
    };
    ($thing_id:expr, $action:ident, $path:expr, $value:expr, $revision:expr) => {
        $crate::event::EventEnvelope::new(
            $crate::model::ThingId::new($thing_id),
            $crate::change::ChangeAction::$action,
            $crate::model::Pointer::parse($path).unwrap(),
            Some($value),
            $revision,
            None,
        )
    };
    ($thing_id:expr, $action:ident, $path:expr, $value:expr, $revision:expr, $timestamp:expr) => {
        $crate::event::EventEnvelope::new(
            $crate::model::ThingId::new($thing_id),
            $crate::change::ChangeAction::$action,
            $crate::model::Pointer::parse($path).unwrap(),
            Some($value),
            $revision,
            Some($timestamp),
        )
    };
}

macro_rules! process_envelope {
    ($observer:expr, [$($envelope:expr),+ $(,)?]) => {
        $(
            $crate::event::EnvelopeObserver::process_envelope(&$observer, &$envelope).await?;
        )+
    };
}

macro_rules! output_test {
    ($formatter:expr, $change:expr, $expected:expr) => {
        let mut buffer = Cursor::new(Vec::new());
        $crate::output::Output::write(&$formatter, &mut buffer, $change)
            .await
            .unwrap();

        assert_eq!($expected, buffer.into_inner().into())
    };
}
