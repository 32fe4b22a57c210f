fn main() -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(repcount_lib::run());

    // The stdin reader blocks on a read that may never complete
    runtime.shutdown_background();
    result
}
