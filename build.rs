use anyhow::Result;
use vergen_gitcl::{Emitter, GitclBuilder};

// `vicsnap --version` reports the commit the binary was built from.
fn main() -> Result<()> {
    let git = GitclBuilder::all_git()?;
    Emitter::default().add_instructions(&git)?.emit()?;
    Ok(())
}
