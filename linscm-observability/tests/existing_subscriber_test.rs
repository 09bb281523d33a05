use linscm_observability::init_tracing;

#[test]
fn host_subscriber_is_kept() {
    tracing::subscriber::set_global_default(tracing_subscriber::fmt().finish()).unwrap();
    assert!(!init_tracing());
    tracing::info!("still logging through the host subscriber");
}
