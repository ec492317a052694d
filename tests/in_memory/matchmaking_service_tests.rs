//! In-memory integration tests for the matchmaking service.

use std::sync::Arc;

use crate::in_memory::helpers::players;
use matchmaking::server_registry::{
    adapters::memory::{InMemoryProvisioner, InMemoryServerRegistry},
    domain::{PatchField, ServerPatch, ServerState, ServerType},
    ports::{ProvisionerError, ServerRegistryError},
    services::{MatchmakingService, MatchmakingServiceError, ProvisionServerRequest},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::json;

type TestService =
    MatchmakingService<InMemoryServerRegistry<DefaultClock>, InMemoryProvisioner, DefaultClock>;

struct TestContext {
    provisioner: Arc<InMemoryProvisioner>,
    service: TestService,
}

#[fixture]
fn context() -> TestContext {
    let provisioner = Arc::new(InMemoryProvisioner::new());
    let service = MatchmakingService::new(
        Arc::new(InMemoryServerRegistry::new(DefaultClock)),
        provisioner.clone(),
        Arc::new(DefaultClock),
    );
    TestContext {
        provisioner,
        service,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn provisioned_server_is_matched_once_free(context: TestContext) {
    let created = context
        .service
        .provision(ProvisionServerRequest::new("thrones/skywars", ServerType::new(4)))
        .await
        .expect("provisioning should succeed");
    let identifier = created.identifier().to_string();

    assert!(context.service.find(ServerType::new(4), 1).is_empty());

    context
        .service
        .update(
            &identifier,
            &ServerPatch::new()
                .with_state(ServerState::Free)
                .with_players_max(12),
        )
        .expect("patch should apply");

    let matches = context.service.find(ServerType::new(4), 12);
    assert_eq!(matches.len(), 1);
    let first = matches.first().expect("match should exist");
    assert_eq!(first.identifier().as_str(), identifier);
    assert_eq!(first.container()["Image"], json!("thrones/skywars"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn busy_server_drops_out_of_matches(context: TestContext) {
    let created = context
        .service
        .provision(ProvisionServerRequest::new("thrones/duels", ServerType::new(2)))
        .await
        .expect("provisioning should succeed");
    let identifier = created.identifier().to_string();
    context
        .service
        .update(
            &identifier,
            &ServerPatch::new()
                .with_state(ServerState::Free)
                .with_players_max(2),
        )
        .expect("patch should apply");

    context
        .service
        .update(
            &identifier,
            &ServerPatch::new()
                .with_players(players(2))
                .with_state(ServerState::Busy),
        )
        .expect("patch should apply");

    assert!(context.service.find(ServerType::new(2), 0).is_empty());
    let current = context.service.get(&identifier).expect("server should exist");
    assert_eq!(current.state(), ServerState::Busy);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn configuration_reaches_the_container_environment(context: TestContext) {
    let created = context
        .service
        .provision(
            ProvisionServerRequest::new("thrones/bedwars", ServerType::new(1))
                .with_configuration("teams=4"),
        )
        .await
        .expect("provisioning should succeed");

    assert_eq!(
        created.container()["Env"],
        json!([
            "SERVER_CONFIGURATION=teams=4",
            "SERVER_IMAGE=thrones/bedwars",
            "SERVER_TYPE=1"
        ])
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn provisioning_failure_registers_nothing(context: TestContext) {
    context
        .provisioner
        .fail_image("thrones/broken", "image not found")
        .expect("failure setup should succeed");

    let result = context
        .service
        .provision(ProvisionServerRequest::new("thrones/broken", ServerType::new(1)))
        .await;

    assert!(matches!(
        result,
        Err(MatchmakingServiceError::Provisioner(
            ProvisionerError::ProvisionFailed { .. }
        ))
    ));
    assert!(context.service.list().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_patch_is_reported_with_its_field(context: TestContext) {
    let created = context
        .service
        .provision(ProvisionServerRequest::new("thrones/skywars", ServerType::new(4)))
        .await
        .expect("provisioning should succeed");
    let patch = ServerPatch::new()
        .with_state(ServerState::Free)
        .with_raw_field(PatchField::Players, json!("{not json"));

    let result = context
        .service
        .update(created.identifier().as_str(), &patch);

    assert!(matches!(
        result,
        Err(MatchmakingServiceError::Registry(ServerRegistryError::Validation(ref err)))
            if err.field() == PatchField::Players
    ));
    let current = context
        .service
        .get(created.identifier().as_str())
        .expect("server should exist");
    assert_eq!(current.state(), ServerState::Startup);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn decommission_releases_and_removes(context: TestContext) {
    let created = context
        .service
        .provision(ProvisionServerRequest::new("thrones/skywars", ServerType::new(4)))
        .await
        .expect("provisioning should succeed");
    let identifier = created.identifier().to_string();

    let removed = context
        .service
        .decommission(&identifier)
        .await
        .expect("decommission should succeed");
    let again = context
        .service
        .decommission(&identifier)
        .await
        .expect("second decommission should succeed");

    assert_eq!(removed, Some(created.clone()));
    assert!(again.is_none());
    assert!(
        !context
            .provisioner
            .is_running(created.identifier())
            .expect("lock should be healthy")
    );
    assert!(matches!(
        context.service.get(&identifier),
        Err(MatchmakingServiceError::NotFound(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_identifier_is_a_domain_error(context: TestContext) {
    let result = context.service.get("  ");

    assert!(matches!(result, Err(MatchmakingServiceError::Domain(_))));
}
