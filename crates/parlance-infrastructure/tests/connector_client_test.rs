use parlance_core::channel::{
    Activity, ChannelOperations, ConversationAccount, ConversationReference,
};
use parlance_infrastructure::ConnectorClient;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer, token: Option<&str>) -> ConnectorClient {
    ConnectorClient::with_options(
        server.uri(),
        token.map(str::to_string),
        Duration::from_secs(5),
    )
    .unwrap()
}

fn reference(service_url: &str) -> ConversationReference {
    ConversationReference {
        activity_id: Some("inbound-1".to_string()),
        conversation: ConversationAccount {
            id: "19:origin@thread.skype".to_string(),
            ..Default::default()
        },
        channel_id: "msteams".to_string(),
        service_url: service_url.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_send_to_channel_creates_conversation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/conversations"))
        .and(header("authorization", "Bearer token-1"))
        .and(body_partial_json(json!({
            "isGroup": true,
            "channelData": { "channel": { "id": "19:general@thread.skype" } },
            "activity": { "type": "message", "text": "announcement" }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "19:general@thread.skype;messageid=42",
            "activityId": "42"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (created, activity_id) = client(&server, Some("token-1"))
        .send_to_channel(
            &reference(&server.uri()),
            &Activity::message("announcement"),
            "19:general@thread.skype",
        )
        .await
        .unwrap();

    assert_eq!(activity_id, "42");
    assert_eq!(
        created.conversation.id,
        "19:general@thread.skype;messageid=42"
    );
    assert_eq!(created.channel_id, "msteams");
}

#[tokio::test]
async fn test_team_details_and_channels() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/teams/team-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "team-1",
            "name": "Core",
            "aadGroupId": "group-1"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/teams/team-1/conversations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "conversations": [
                { "id": "19:general@thread.skype", "name": "General" },
                { "id": "19:random@thread.skype" }
            ]
        })))
        .mount(&server)
        .await;

    let client = client(&server, None);
    let details = client.get_team_details("team-1").await.unwrap();
    assert_eq!(details.name.as_deref(), Some("Core"));
    assert_eq!(details.aad_group_id.as_deref(), Some("group-1"));

    let channels = client.get_channels("team-1").await.unwrap();
    assert_eq!(channels.len(), 2);
    assert_eq!(channels[0].name.as_deref(), Some("General"));
    assert!(channels[1].name.is_none());
}

#[tokio::test]
async fn test_get_members() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/conversations/19:abc@thread.skype/members"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "29:user-1", "name": "Ada", "email": "ada@example.com" },
            { "id": "29:user-2", "givenName": "Grace" }
        ])))
        .mount(&server)
        .await;

    let members = client(&server, None)
        .get_members("19:abc@thread.skype")
        .await
        .unwrap();

    assert_eq!(members.len(), 2);
    assert_eq!(members[0].email.as_deref(), Some("ada@example.com"));
    assert_eq!(members[1].given_name.as_deref(), Some("Grace"));
}

#[tokio::test]
async fn test_error_status_is_channel_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/teams/team-1"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server, None)
        .get_team_details("team-1")
        .await
        .unwrap_err();

    assert!(err.is_channel_unavailable());
    assert!(err.to_string().contains("403"));
}

#[tokio::test]
async fn test_unreachable_service_is_channel_unavailable() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = ConnectorClient::with_options(uri, None, Duration::from_secs(2)).unwrap();
    let err = client.get_channels("team-1").await.unwrap_err();
    assert!(err.is_channel_unavailable());
}
