fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Use the bundled protoc so the build does not depend on a system install
    let protoc = protoc_bin_vendored::protoc_bin_path().map_err(|e| e.to_string())?;
    std::env::set_var("PROTOC", protoc);

    // Generate gRPC code from proto files
    tonic_build::configure()
        .build_server(true)
        .build_client(false)
        .compile(&["../proto/auth.proto"], &["../proto"])?;

    Ok(())
}
