//! Then steps for script management BDD scenarios.

use super::world::{ScriptWorld, run_async};
use palladio::script::services::ScriptServiceError;
use rstest_bdd_macros::then;

#[then("the listing reports {count:usize} scripts")]
fn listing_reports(world: &ScriptWorld, count: usize) -> Result<(), eyre::Report> {
    let page = world
        .last_listing
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing listing in scenario world"))?;
    if page.count() != count {
        return Err(eyre::eyre!(
            "expected {count} scripts, found {}",
            page.count()
        ));
    }
    Ok(())
}

#[then(r#"creation fails with a validation error on "{field}""#)]
fn creation_fails_on_field(world: &ScriptWorld, field: String) -> Result<(), eyre::Report> {
    let result = world
        .last_create_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing create result in scenario world"))?;
    match result {
        Err(ScriptServiceError::Validation(errors)) if errors.has_field(&field) => Ok(()),
        other => Err(eyre::eyre!(
            "expected validation error on {field}, got {other:?}"
        )),
    }
}

#[then("the script is not found")]
fn script_not_found(world: &ScriptWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_get_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing lookup result in scenario world"))?;
    if !matches!(result, Err(ScriptServiceError::ScriptNotFound(_))) {
        return Err(eyre::eyre!("expected script not found, got {result:?}"));
    }
    Ok(())
}

#[then(r#"the script titled "{title}" uses "{language}""#)]
fn script_uses_language(
    world: &ScriptWorld,
    title: String,
    language: String,
) -> Result<(), eyre::Report> {
    let process = world.current_process()?;
    let script = world
        .last_script
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no script in scenario world"))?;
    let stored = run_async(world.scripts.get(process, script.id()))
        .map_err(|err| eyre::eyre!("lookup failed: {err}"))?;
    if stored.title().as_str() != title || stored.language().as_str() != language {
        return Err(eyre::eyre!(
            "expected '{title}' in {language}, found '{}' in {}",
            stored.title(),
            stored.language()
        ));
    }
    Ok(())
}
