use serde_json::json;
use tokio::sync::mpsc::UnboundedReceiver;

use twin_client::bus::SubscriptionFilter;
use twin_client::change::{ChangeAction, TwinChange};
use twin_client::envelope;
use twin_client::error::Error;
use twin_client::pointer;
use twin_client::test_util::VecEventSource;
use twin_client::twin::{ConsumptionOptions, TwinClient};

fn drained(mut receiver: UnboundedReceiver<TwinChange>) -> Vec<TwinChange> {
    let mut changes = vec![];
    while let Ok(change) = receiver.try_recv() {
        changes.push(change);
    }

    changes
}

#[tokio::test]
async fn delivers_mapped_changes_of_every_kind() -> Result<(), Error> {
    let source = VecEventSource::new([
        envelope!(
            "org.example:sensor-1",
            Created,
            "/attributes/location",
            json!({"lat": 52.5}),
            1
        ),
        envelope!(
            "org.example:sensor-1",
            Updated,
            "/features/lamp",
            json!({"properties": {"on": true}}),
            2,
            1000
        ),
        envelope!(
            "org.example:sensor-1",
            Merged,
            "/features",
            json!({"door": {"properties": {"open": false}}}),
            3
        ),
    ]);

    let mut client = TwinClient::new(source);
    let (_subscription, receiver) = client.register_for_changes();

    client.start_consumption().await?;

    let changes = drained(receiver);

    assert_eq!(changes.len(), 3);

    match &changes[0] {
        TwinChange::Thing(change) => {
            assert_eq!(change.value(), Some(&json!({"lat": 52.5})));
            assert_eq!(change.revision(), 1);
        }
        other => panic!("expected a thing change, got {other:?}"),
    }

    match &changes[1] {
        TwinChange::Feature(change) => {
            assert_eq!(change.feature().unwrap().name(), "lamp");
            assert_eq!(change.value(), Some(&json!({"properties": {"on": true}})));
            assert_eq!(change.timestamp(), Some(1000));
        }
        other => panic!("expected a feature change, got {other:?}"),
    }

    match &changes[2] {
        TwinChange::Features(change) => {
            assert_eq!(change.features().unwrap().len(), 1);
            assert_eq!(change.action(), ChangeAction::Merged);
        }
        other => panic!("expected a features change, got {other:?}"),
    }

    Ok(())
}

#[tokio::test]
async fn keeps_publication_order_per_subscriber() -> Result<(), Error> {
    let source = VecEventSource::new([
        envelope!("org.example:sensor-1", Created, "/attributes", json!({}), 1),
        envelope!("org.example:sensor-1", Updated, "/attributes", json!({}), 2),
        envelope!("org.example:sensor-1", Deleted, "/attributes", json!({}), 3),
    ]);

    let mut client = TwinClient::new(source);
    let (_subscription, receiver) = client.register_for_changes();

    client.start_consumption().await?;

    let revisions: Vec<u64> = drained(receiver)
        .iter()
        .map(|change| change.change().revision())
        .collect();

    assert_eq!(revisions, vec![1, 2, 3]);
    Ok(())
}

#[tokio::test]
async fn routes_changes_by_subscription_filters() -> Result<(), Error> {
    let source = VecEventSource::new([
        envelope!("org.example:sensor-1", Updated, "/attributes", json!({}), 1),
        envelope!(
            "org.example:sensor-1",
            Updated,
            "/features/lamp",
            json!({}),
            2
        ),
        envelope!(
            "org.example:sensor-1",
            Updated,
            "/features/door",
            json!({}),
            3
        ),
    ]);

    let mut client = TwinClient::new(source);
    let (_things, things_rx) = client.register_for_thing_changes();
    let (_lamp, lamp_rx) = client.register_for_feature_changes(Some("lamp"));
    let (_features, features_rx) = client.register_for_feature_changes(None);

    client.start_consumption().await?;

    assert_eq!(drained(things_rx).len(), 1);

    let lamp_changes = drained(lamp_rx);
    assert_eq!(lamp_changes.len(), 1);
    assert_eq!(
        lamp_changes[0].change().path().to_string(),
        "/features/lamp"
    );

    assert_eq!(drained(features_rx).len(), 2);
    Ok(())
}

#[tokio::test]
async fn stops_delivery_for_deregistered_subscription() -> Result<(), Error> {
    let source = VecEventSource::new([envelope!(
        "org.example:sensor-1",
        Created,
        "/attributes",
        json!({}),
        1
    )]);

    let mut client = TwinClient::new(source);
    let (gone, gone_rx) = client.register_for_changes();
    let (_kept, kept_rx) = client.register_for_changes();

    assert!(client.deregister(gone));

    client.start_consumption().await?;

    assert_eq!(drained(gone_rx).len(), 0);
    assert_eq!(drained(kept_rx).len(), 1);
    Ok(())
}

#[tokio::test]
async fn consumption_options_gate_changes_before_any_subscriber() -> Result<(), Error> {
    let source = VecEventSource::new([
        envelope!("org.example:sensor-1", Created, "/attributes", json!({}), 1),
        envelope!("org.other:sensor-2", Created, "/attributes", json!({}), 2),
        envelope!(
            "org.example:sensor-1",
            Updated,
            "/features/lamp",
            json!({}),
            3
        ),
    ]);

    let mut client = TwinClient::new(source);
    let (_subscription, receiver) = client.register_for_changes();

    client
        .start_consumption_with(
            ConsumptionOptions::new()
                .with_namespaces(["org.example"])
                .with_path_filter(pointer!("/features")),
        )
        .await?;

    let changes = drained(receiver);

    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].change().revision(), 3);
    Ok(())
}

#[tokio::test]
async fn dropped_subscriber_does_not_stall_consumption() -> Result<(), Error> {
    let source = VecEventSource::new([
        envelope!("org.example:sensor-1", Created, "/attributes", json!({}), 1),
        envelope!("org.example:sensor-1", Updated, "/attributes", json!({}), 2),
    ]);

    let mut client = TwinClient::new(source);
    let (_dead, dead_rx) = client.register(SubscriptionFilter::any());
    let (_live, live_rx) = client.register(SubscriptionFilter::any());
    drop(dead_rx);

    client.start_consumption().await?;

    assert_eq!(drained(live_rx).len(), 2);
    Ok(())
}
