//! Given steps for script management BDD scenarios.

use super::world::{ScriptWorld, build_request, run_async};
use eyre::WrapErr;
use palladio::process::{domain::ProcessId, services::CreateProcessRequest};
use rstest_bdd_macros::given;

fn create_process(world: &mut ScriptWorld, name: &str) -> Result<ProcessId, eyre::Report> {
    let process = run_async(world.processes.create(CreateProcessRequest::new(name)))
        .wrap_err("create process for scenario")?;
    world.process_ids.insert(name.to_owned(), process.id());
    Ok(process.id())
}

#[given(r#"a process named "{name}""#)]
fn a_process_named(world: &mut ScriptWorld, name: String) -> Result<(), eyre::Report> {
    let id = create_process(world, &name)?;
    world.current_process = Some(id);
    Ok(())
}

#[given(r#"another process named "{name}""#)]
fn another_process_named(world: &mut ScriptWorld, name: String) -> Result<(), eyre::Report> {
    create_process(world, &name)?;
    Ok(())
}

#[given(r#"a script titled "{title}" in that process"#)]
fn a_script_titled(world: &mut ScriptWorld, title: String) -> Result<(), eyre::Report> {
    let process = world.current_process()?;
    let script = run_async(world.scripts.create(process, build_request(&title)))
        .wrap_err("create script for scenario")?;
    world.last_script = Some(script);
    Ok(())
}
