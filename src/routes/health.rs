/// GET /health
/// Liveness probe. The gateway holds no state of its own, so being able to
/// answer is the whole check; backend reachability is reported per request.
pub async fn health_check() -> &'static str {
    "ok"
}
