//! When steps for script management BDD scenarios.

use super::world::{ScriptWorld, build_request, run_async};
use palladio::pagination::ListParams;
use palladio::script::services::UpdateScriptRequest;
use rstest_bdd_macros::when;

#[when("the process scripts are listed")]
fn scripts_are_listed(world: &mut ScriptWorld) -> Result<(), eyre::Report> {
    let process = world.current_process()?;
    let (_, page) = run_async(world.scripts.list(process, ListParams::default()))
        .map_err(|err| eyre::eyre!("list failed: {err}"))?;
    world.last_listing = Some(page);
    Ok(())
}

#[when(r#"a script titled "{title}" is created in that process"#)]
fn script_is_created(world: &mut ScriptWorld, title: String) -> Result<(), eyre::Report> {
    let process = world.current_process()?;
    world.last_create_result = Some(run_async(
        world.scripts.create(process, build_request(&title)),
    ));
    Ok(())
}

#[when(r#"the script is requested through "{name}""#)]
fn script_requested_through(world: &mut ScriptWorld, name: String) -> Result<(), eyre::Report> {
    let process = *world
        .process_ids
        .get(&name)
        .ok_or_else(|| eyre::eyre!("unknown process '{name}'"))?;
    let script = world
        .last_script
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no script in scenario world"))?
        .id();
    world.last_get_result = Some(run_async(world.scripts.get(process, script)));
    Ok(())
}

#[when(r#"the script language is changed to "{language}""#)]
fn script_language_changed(world: &mut ScriptWorld, language: String) -> Result<(), eyre::Report> {
    let process = world.current_process()?;
    let script = world
        .last_script
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no script in scenario world"))?
        .id();
    let request = UpdateScriptRequest::new().with_language(Some(language));
    let updated = run_async(world.scripts.update(process, script, request))
        .map_err(|err| eyre::eyre!("update failed: {err}"))?;
    world.last_script = Some(updated);
    Ok(())
}
