use axum::response::Html;

const LANDING_PAGE: &str = include_str!("../../views/index.html");

pub async fn landing_page() -> Html<&'static str> {
    Html(LANDING_PAGE)
}
