use vergen::{Emitter, RustcBuilder};
use vergen_git2::Git2Builder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rustc = RustcBuilder::default().semver(true).build()?;

    // Source tarballs have no git metadata; fall back to a placeholder SHA.
    match Git2Builder::default().sha(true).build() {
        Ok(git2) => {
            Emitter::default()
                .add_instructions(&rustc)?
                .add_instructions(&git2)?
                .emit()?;
        }
        Err(_) => {
            println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");
            Emitter::default().add_instructions(&rustc)?.emit()?;
        }
    }

    Ok(())
}
