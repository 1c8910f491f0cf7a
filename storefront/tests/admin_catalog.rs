mod common;

use common::{Multipart, PNG_BYTES, TestApp, donut_form, json_body, location};
use http::StatusCode;
use storefront::db::repository::catalog;

#[tokio::test]
async fn test_admin_requires_login() {
    let app = TestApp::new().await;

    for uri in ["/admin", "/admin/pastries", "/admin/pastries/add", "/admin/logout"] {
        let response = app.get(uri, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/admin/login");
    }

    let response = app.get("/admin", Some("bakery_session=forged.token.value")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_mutations_without_session_change_nothing() {
    let app = TestApp::new().await;
    let cookie = app.login().await;
    let (id, original) = add_donut(&app, &cookie).await;

    let form = donut_form().file("image_file", "donut.png", PNG_BYTES);
    let response = app.post_multipart("/admin/pastries/add", "", form).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/login");

    let form = Multipart::new()
        .text("name", "Renamed")
        .text("price", "1")
        .text("description", "Changed")
        .text("category", "Cakes");
    let response = app
        .post_multipart(&format!("/admin/pastries/edit/{id}"), "", form)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/login");

    let response = app.get(&format!("/admin/pastries/delete/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/login");

    assert_eq!(catalog::count_all(&app.state.pool).await.unwrap(), 1);
    let stored = catalog::get_by_id(&app.state.pool, id).await.unwrap();
    assert_eq!(stored.name, original["name"]);
    assert_eq!(stored.description, original["description"]);
    assert_eq!(stored.category, original["category"]);
}

#[tokio::test]
async fn test_session_of_removed_account_is_rejected() {
    let app = TestApp::new().await;
    let cookie = app.login().await;

    sqlx::query("DELETE FROM admin_user")
        .execute(&app.state.pool)
        .await
        .unwrap();

    let response = app.get("/admin", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/login");
}

#[tokio::test]
async fn test_login_flow() {
    let app = TestApp::new().await;

    let response = app
        .post_form("/admin/login", "username=admin&password=wrong")
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Invalid username or password");

    let response = app
        .post_form("/admin/login", "username=nobody&password=admin123")
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let cookie = app.login().await;

    let response = app.get("/admin/login", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin");

    let response = app.get("/admin", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["admin"]["username"], "admin");
    assert_eq!(body["data"]["total_pastries"], 0);

    let response = app.get("/admin/logout", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let cleared = response.headers().get(http::header::SET_COOKIE).unwrap();
    assert!(cleared.to_str().unwrap().contains("Max-Age=0"));
}

#[tokio::test]
async fn test_add_rejects_disallowed_image() {
    let app = TestApp::new().await;
    let cookie = app.login().await;

    let form = donut_form().file("image_file", "photo.bmp", PNG_BYTES);
    let response = app.post_multipart("/admin/pastries/add", &cookie, form).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["message"], "No valid image file uploaded.");
    assert_eq!(catalog::count_all(&app.state.pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_add_round_trips_all_fields() {
    let app = TestApp::new().await;
    let cookie = app.login().await;

    let form = donut_form()
        .file("image_file", "donut.png", PNG_BYTES)
        .file("gallery_files", "side.jpg", PNG_BYTES)
        .file("gallery_files", "top.webp", PNG_BYTES);
    let response = app.post_multipart("/admin/pastries/add", &cookie, form).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Pastry \"Glazed Donuts\" added successfully!");
    let id = body["data"]["id"].as_i64().unwrap();

    let response = app.get(&format!("/pastry/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let pastry = &body["data"]["pastry"];
    assert_eq!(pastry["name"], "Glazed Donuts");
    assert_eq!(pastry["price"], 2000.0);
    assert_eq!(pastry["serving_size"], "6 pieces");
    assert_eq!(pastry["available"], true);
    assert_eq!(pastry["ingredients"], serde_json::json!(["Flour", "Sugar", "Yeast"]));
    assert_eq!(pastry["allergens"], serde_json::json!(["Gluten", "Dairy"]));
    assert_eq!(pastry["features"], serde_json::json!(["Freshly glazed"]));
    assert_eq!(pastry["gallery"].as_array().unwrap().len(), 2);

    let image_url = pastry["image_url"].as_str().unwrap();
    assert!(image_url.starts_with("/static/uploads/"));
    let response = app.get(image_url, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[http::header::CONTENT_TYPE], "image/png");
}

#[tokio::test]
async fn test_add_with_new_category() {
    let app = TestApp::new().await;
    let cookie = app.login().await;

    let form = Multipart::new()
        .text("name", "Lemon Tart")
        .text("price", "3500")
        .text("description", "Zesty")
        .text("category", "new_category")
        .text("new_category_input", "Tarts")
        .file("image_file", "tart.jpeg", PNG_BYTES);
    let response = app.post_multipart("/admin/pastries/add", &cookie, form).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["category"], "Tarts");
    assert_eq!(body["data"]["available"], false);
    assert_eq!(body["data"]["ingredients"], serde_json::json!([]));

    let response = app.get("/admin/pastries/Tarts", Some(&cookie)).await;
    let body = json_body(response).await;
    assert_eq!(body["data"]["pastries"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["selected_category"], "Tarts");
}

async fn add_donut(app: &TestApp, cookie: &str) -> (i64, serde_json::Value) {
    let form = donut_form()
        .file("image_file", "donut.png", PNG_BYTES)
        .file("gallery_files", "g1.png", PNG_BYTES)
        .file("gallery_files", "g2.png", PNG_BYTES);
    let response = app.post_multipart("/admin/pastries/add", cookie, form).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    (body["data"]["id"].as_i64().unwrap(), body["data"].clone())
}

#[tokio::test]
async fn test_edit_without_gallery_keeps_gallery() {
    let app = TestApp::new().await;
    let cookie = app.login().await;
    let (id, original) = add_donut(&app, &cookie).await;

    let response = app.get(&format!("/admin/pastries/edit/{id}"), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["pastry"]["ingredients_str"], r#"["Flour","Sugar","Yeast"]"#);

    let form = donut_form().text("price", "2500");
    let response = app
        .post_multipart(&format!("/admin/pastries/edit/{id}"), &cookie, form)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["gallery"], original["gallery"]);
    assert_eq!(body["data"]["image"], original["image"]);
}

#[tokio::test]
async fn test_edit_gallery_with_one_bad_file() {
    let app = TestApp::new().await;
    let cookie = app.login().await;
    let (id, original) = add_donut(&app, &cookie).await;

    let form = donut_form()
        .file("gallery_files", "broken.tiff", PNG_BYTES)
        .file("gallery_files", "fresh.gif", PNG_BYTES);
    let response = app
        .post_multipart(&format!("/admin/pastries/edit/{id}"), &cookie, form)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let item = catalog::get_by_id(&app.state.pool, id).await.unwrap();
    assert_eq!(item.gallery.len(), 1);
    assert!(item.gallery[0].ends_with(".gif"));
    assert_ne!(serde_json::json!(item.gallery), original["gallery"]);
}

#[tokio::test]
async fn test_edit_rejects_malformed_list() {
    let app = TestApp::new().await;
    let cookie = app.login().await;
    let (id, _) = add_donut(&app, &cookie).await;

    let form = donut_form().text("allergens", "Gluten, Dairy");
    let response = app
        .post_multipart(&format!("/admin/pastries/edit/{id}"), &cookie, form)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let item = catalog::get_by_id(&app.state.pool, id).await.unwrap();
    assert_eq!(item.allergens, vec!["Gluten", "Dairy"]);
}

#[tokio::test]
async fn test_delete() {
    let app = TestApp::new().await;
    let cookie = app.login().await;
    let (id, _) = add_donut(&app, &cookie).await;

    let response = app.get("/admin/pastries/delete/9999", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .get(&format!("/admin/pastries/delete/{id}"), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Pastry \"Glazed Donuts\" deleted successfully!");

    let response = app.get(&format!("/pastry/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dashboard_totals() {
    let app = TestApp::new().await;
    let cookie = app.login().await;
    add_donut(&app, &cookie).await;
    add_donut(&app, &cookie).await;

    let body = json_body(app.get("/admin", Some(&cookie)).await).await;
    let data = &body["data"];
    assert_eq!(data["total_pastries"], 2);
    assert_eq!(data["total_categories"], 1);
    assert_eq!(data["total_value"], 4000.0);
    assert_eq!(data["available"], 2);
    assert_eq!(data["category_counts"][0]["category"], "Donuts");
    assert_eq!(data["category_counts"][0]["count"], 2);
}
