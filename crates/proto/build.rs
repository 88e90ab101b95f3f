fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Compile one proto file per downstream capability
    for file in [
        "../../proto/search.proto",
        "../../proto/profile.proto",
        "../../proto/recommendation.proto",
        "../../proto/reservation.proto",
        "../../proto/user.proto",
        "../../proto/admin.proto",
    ] {
        tonic_build::compile_protos(file)?;
    }
    Ok(())
}
