use std::path::PathBuf;

use plandrive_lib::pipeline::{ComponentSelection, OptionGroups, PipelineRequest};
use plandrive_lib::resolve::Component;
use plandrive_lib::{PipelineError, PipelineRunner, ResolveError};

use super::common::FakeBuild;

fn request(build: &str, alias: Option<&str>, plan_file: &str) -> PipelineRequest {
  let mut request = PipelineRequest::new(
    build,
    ComponentSelection::all(),
    vec!["problem.pddl".to_string()],
    OptionGroups::default(),
    alias.map(str::to_string),
    None,
    plan_file,
  )
  .unwrap();
  // Route both intermediate files to an empty file the fixture controls.
  request.preprocess_input = None;
  request.search_input = None;
  request
}

#[cfg(unix)]
#[tokio::test]
async fn alias_pipeline_runs_all_stages_with_plan_file() {
  let build = FakeBuild::new();
  build.install("translate", 0);
  build.install("preprocess", 0);
  build.install("downward", 0);
  let resolver = build.resolver();
  let aliases = build.aliases();
  let runner = PipelineRunner::new(&resolver, &aliases, "/bin/sh");

  let outcome = runner
    .run(&request("release32", Some("goal-count"), "my_plan"))
    .await
    .unwrap();

  assert!(outcome.is_success());
  assert_eq!(outcome.stages.len(), 3);
  assert_eq!(build.calls("translate").unwrap(), vec!["problem.pddl"]);
  assert_eq!(build.calls("preprocess").unwrap(), Vec::<String>::new());
  assert_eq!(
    build.calls("downward").unwrap(),
    vec!["--search", "wastar(gc())", "--plan-file", "my_plan"]
  );
}

#[cfg(unix)]
#[tokio::test]
async fn translate_failure_stops_pipeline_with_its_exit_code() {
  let build = FakeBuild::new();
  build.install("translate", 3);
  build.install("preprocess", 0);
  build.install("downward", 0);
  let resolver = build.resolver();
  let aliases = build.aliases();
  let runner = PipelineRunner::new(&resolver, &aliases, "/bin/sh");

  let outcome = runner
    .run(&request("release32", Some("goal-count"), "sas_plan"))
    .await
    .unwrap();

  assert_eq!(outcome.exit_code(), 3);
  assert_eq!(outcome.stages.len(), 1);
  assert_eq!(outcome.failed_stage().unwrap().component, Component::Translate);
  assert_eq!(build.calls("preprocess"), None);
  assert_eq!(build.calls("downward"), None);
}

#[cfg(unix)]
#[tokio::test]
async fn search_exit_code_is_preserved() {
  let build = FakeBuild::new();
  build.install("translate", 0);
  build.install("preprocess", 0);
  build.install("downward", 12);
  let resolver = build.resolver();
  let aliases = build.aliases();
  let runner = PipelineRunner::new(&resolver, &aliases, "/bin/sh");

  let outcome = runner
    .run(&request("release32", Some("goal-count"), "sas_plan"))
    .await
    .unwrap();

  assert_eq!(outcome.exit_code(), 12);
  assert_eq!(outcome.failed_stage().unwrap().component, Component::Search);
}

#[cfg(unix)]
#[tokio::test]
async fn missing_search_options_spawn_nothing() {
  let build = FakeBuild::new();
  build.install("translate", 0);
  build.install("preprocess", 0);
  build.install("downward", 0);
  let resolver = build.resolver();
  let aliases = build.aliases();
  let runner = PipelineRunner::new(&resolver, &aliases, "/bin/sh");

  let err = runner.run(&request("release32", None, "sas_plan")).await.unwrap_err();

  assert!(matches!(err, PipelineError::MissingSearchOptions));
  assert_eq!(build.calls("translate"), None);
}

#[cfg(unix)]
#[tokio::test]
async fn missing_search_binary_names_downward_and_directory() {
  let build = FakeBuild::new();
  build.install("translate", 0);
  build.install("preprocess", 0);
  let dir = build.bin_dir().to_string_lossy().into_owned();
  let resolver = build.resolver();
  let aliases = build.aliases();
  let runner = PipelineRunner::new(&resolver, &aliases, "/bin/sh");

  let mut request = request(&dir, Some("goal-count"), "sas_plan");
  request.components = ComponentSelection::from_flags(false, false, true, false);

  let err = runner.run(&request).await.unwrap_err();

  match &err {
    PipelineError::Resolve(ResolveError::ExecutableNotFound { component, build, path, .. }) => {
      assert_eq!(*component, Component::Search);
      assert_eq!(build, &dir);
      assert_eq!(path, &PathBuf::from(&dir).join("downward"));
    }
    other => panic!("unexpected error: {other}"),
  }
  assert!(err.to_string().contains("'downward'"));
}

#[tokio::test]
async fn unknown_build_is_reported_before_running() {
  let build = FakeBuild::new();
  let resolver = build.resolver();
  let aliases = build.aliases();
  let runner = PipelineRunner::new(&resolver, &aliases, "python3");

  let err = runner
    .run(&request("debug64", Some("goal-count"), "sas_plan"))
    .await
    .unwrap_err();

  assert!(matches!(err, PipelineError::Resolve(ResolveError::BuildNotFound { .. })));
  assert!(err.to_string().contains("plandrive build debug64"));
}
