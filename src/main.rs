use flyview::config::ViewerConfig;

/// `flyview [MODEL]` where MODEL is an OBJ path relative to `assets/` or
/// absolute. Defaults to the bundled crate model.
fn main() -> anyhow::Result<()> {
    let mut config = ViewerConfig::default();
    if let Some(model_path) = std::env::args_os().nth(1) {
        config.model_path = model_path.into();
    }
    flyview::flow::run(config)
}
