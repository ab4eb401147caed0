fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=proto/");

    let proto_files = vec![
        "proto/services/auth_service.proto",
        "proto/services/user_service.proto",
        "proto/services/election_service.proto",
        "proto/services/storage_service.proto",
    ];

    tonic_prost_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&proto_files, &["proto/"])?;

    Ok(())
}
