pub async fn home() -> &'static str {
    "Welcome to the homepage."
}
