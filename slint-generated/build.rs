fn main() {
    println!("cargo:EMBED_TEXTURES=1");
    let config = slint_build::CompilerConfiguration::new()
        .with_style("fluent-dark".into())
        .embed_resources(slint_build::EmbedResourcesKind::EmbedForSoftwareRenderer);
    slint_build::compile_with_config("ui/app-window.slint", config).expect("Slint build failed");
}
