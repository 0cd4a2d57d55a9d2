//! Output-directory emission and re-run stability.

#[cfg(test)]
mod tests {
    use std::fs;

    use playstack_cfn::lambda::FunctionProperties;
    use playstack_cfn::template::Template;
    use playstack_constructs::{Manifest, emit, synthesize_all};

    use crate::{alice_registry, playground_layout};

    #[test]
    fn test_should_write_one_template_file_per_stack() {
        let dir = tempfile::tempdir().unwrap();
        let stacks = synthesize_all(&alice_registry(), &playground_layout()).unwrap();
        emit(dir.path(), &stacks).unwrap();

        let mut files: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        files.sort();
        assert_eq!(
            files,
            vec![
                "alice-playground-api-stack.template.json",
                "beta-playground-api-stack.template.json",
                "manifest.json",
                "prod-playground-api-stack.template.json",
            ]
        );
    }

    #[test]
    fn test_should_round_trip_emitted_templates() {
        let dir = tempfile::tempdir().unwrap();
        let stacks = synthesize_all(&alice_registry(), &playground_layout()).unwrap();
        emit(dir.path(), &stacks).unwrap();

        let raw =
            fs::read_to_string(dir.path().join("prod-playground-api-stack.template.json")).unwrap();
        let template: Template = serde_json::from_str(&raw).unwrap();
        assert_eq!(template.format_version, "2010-09-09");
        assert_eq!(
            template.description.as_deref(),
            Some("Playground API stack for the prod environment")
        );
    }

    #[test]
    fn test_should_list_every_stack_and_its_assets_in_the_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let stacks = synthesize_all(&alice_registry(), &playground_layout()).unwrap();
        emit(dir.path(), &stacks).unwrap();

        let raw = fs::read_to_string(dir.path().join("manifest.json")).unwrap();
        let manifest: Manifest = serde_json::from_str(&raw).unwrap();
        assert_eq!(manifest.stacks.len(), 3);

        for artifact in &manifest.stacks {
            assert_eq!(artifact.code_assets.len(), 1);
            let asset = &artifact.code_assets[0];
            assert_eq!(asset.local_path, "target/lambda/playground-api");
            assert!(asset.s3_key.ends_with("/bootstrap.zip"));
        }
    }

    #[test]
    fn test_should_emit_stable_output_across_runs() {
        let registry = alice_registry();
        let layout = playground_layout();

        let first_dir = tempfile::tempdir().unwrap();
        emit(first_dir.path(), &synthesize_all(&registry, &layout).unwrap()).unwrap();
        let second_dir = tempfile::tempdir().unwrap();
        emit(second_dir.path(), &synthesize_all(&registry, &layout).unwrap()).unwrap();

        for file in ["beta-playground-api-stack.template.json", "manifest.json"] {
            let first = fs::read_to_string(first_dir.path().join(file)).unwrap();
            let second = fs::read_to_string(second_dir.path().join(file)).unwrap();
            assert_eq!(strip_timestamps(&first), strip_timestamps(&second), "{file}");
        }
    }

    /// Blank out the generation-timestamp descriptions before comparison.
    fn strip_timestamps(raw: &str) -> String {
        let Ok(mut value) = serde_json::from_str::<serde_json::Value>(raw) else {
            return raw.to_owned();
        };
        if let Some(resources) = value["Resources"].as_object_mut() {
            for resource in resources.values_mut() {
                if resource["Type"] == FunctionProperties::TYPE {
                    if let Some(props) = resource["Properties"].as_object_mut() {
                        props.remove("Description");
                    }
                }
            }
        }
        value.to_string()
    }
}
