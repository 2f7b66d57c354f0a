mod renderer;

use anyhow::Result;

fn main() -> Result<()> {
    renderer::run_demo()
}
