mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{query, Caller, Harness};
use cs156_example_api::entities::UcsbOrganization;

fn organization(code: &str, short: &str, long: &str, inactive: bool) -> UcsbOrganization {
    UcsbOrganization {
        org_code: code.to_string(),
        org_translation_short: short.to_string(),
        org_translation: long.to_string(),
        inactive,
    }
}

fn gsac() -> UcsbOrganization {
    organization("GSAC", "Gaucho Sports Analytics", "Gaucho Sports Analytics Club", false)
}

#[tokio::test]
async fn user_lists_organizations_in_key_order() {
    let harness = Harness::new();
    harness
        .organizations
        .seed(organization("UCSBCHESS", "Chess Club", "UCSB Chess Club", false))
        .await;
    harness
        .organizations
        .seed(organization("FCSB", "Fencing Club", "UCSB Fencing Club", true))
        .await;

    let res = harness.get("/api/ucsborganizations/all", Caller::User).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body[0]["orgCode"], "FCSB");
    assert_eq!(res.body[1]["orgCode"], "UCSBCHESS");
}

#[tokio::test]
async fn admin_posts_organization_with_natural_key() {
    let harness = Harness::new();

    let uri = format!(
        "/api/ucsborganizations/post?{}",
        query(&[
            ("orgCode", "FCSB"),
            ("orgTranslationShort", "Fencing Club"),
            ("orgTranslation", "UCSB Fencing Club"),
            ("inactive", "true"),
        ])
    );
    let res = harness.post(&uri, Caller::Admin).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.body,
        json!({
            "orgCode": "FCSB",
            "orgTranslationShort": "Fencing Club",
            "orgTranslation": "UCSB Fencing Club",
            "inactive": true,
        })
    );
}

#[tokio::test]
async fn user_gets_organization_by_org_code() {
    let harness = Harness::new();
    harness.organizations.seed(gsac()).await;

    let res = harness.get("/api/ucsborganizations?orgCode=GSAC", Caller::User).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, serde_json::to_value(gsac()).unwrap());

    let res = harness.get("/api/ucsborganizations?orgCode=NOTEXIST", Caller::User).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["message"], "UCSBOrganization with id NOTEXIST not found");
}

#[tokio::test]
async fn numeric_id_parameter_is_not_accepted() {
    let harness = Harness::new();

    let res = harness.get("/api/ucsborganizations?id=1", Caller::User).await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_updates_organization() {
    let harness = Harness::new();
    harness.organizations.seed(gsac()).await;

    let res = harness
        .put(
            "/api/ucsborganizations?orgCode=GSAC",
            Caller::Admin,
            json!({
                "orgCode": "SOMETHING_ELSE",
                "orgTranslationShort": "GSA",
                "orgTranslation": "Gaucho Sports Analytics Association",
                "inactive": true,
            }),
        )
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.body,
        json!({
            "orgCode": "GSAC",
            "orgTranslationShort": "GSA",
            "orgTranslation": "Gaucho Sports Analytics Association",
            "inactive": true,
        })
    );
    assert_eq!(harness.organizations.rows().await.len(), 1);
}

#[tokio::test]
async fn updating_missing_organization_does_not_save() {
    let harness = Harness::new();

    let res = harness
        .put(
            "/api/ucsborganizations?orgCode=NOTEXIST",
            Caller::Admin,
            json!({
                "orgTranslationShort": "Nope",
                "orgTranslation": "Does not exist",
                "inactive": false,
            }),
        )
        .await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(harness.organizations.save_count(), 0);
}

#[tokio::test]
async fn admin_deletes_organization() {
    let harness = Harness::new();
    harness.organizations.seed(gsac()).await;

    let res = harness.delete("/api/ucsborganizations?orgCode=GSAC", Caller::Admin).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "UCSBOrganization with id GSAC deleted");
    assert_eq!(harness.organizations.deleted(), vec![gsac()]);

    let res = harness.delete("/api/ucsborganizations?orgCode=NOTEXIST", Caller::Admin).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}
