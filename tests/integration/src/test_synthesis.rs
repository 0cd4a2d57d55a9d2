//! Full-pipeline synthesis tests: registry through rendered templates.

#[cfg(test)]
mod tests {
    use playstack_cfn::dynamodb::TableProperties;
    use playstack_cfn::iam::PolicyProperties;
    use playstack_cfn::lambda::{FunctionProperties, UrlProperties};
    use playstack_constructs::synthesize_all;
    use playstack_core::{EnvironmentRegistry, PlaystackError};

    use crate::{alice_registry, playground_layout};

    #[test]
    fn test_should_synthesize_one_stack_per_environment() {
        let stacks = synthesize_all(&alice_registry(), &playground_layout()).unwrap();

        let ids: Vec<_> = stacks.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "alice-playground-api-stack",
                "beta-playground-api-stack",
                "prod-playground-api-stack"
            ]
        );
    }

    #[test]
    fn test_should_give_every_stack_a_function_grant_and_url() {
        let stacks = synthesize_all(&alice_registry(), &playground_layout()).unwrap();

        for stack in &stacks {
            let template = &stack.template;
            assert_eq!(
                template.resources_of_type(FunctionProperties::TYPE).len(),
                1,
                "stack {}",
                stack.id
            );
            assert_eq!(
                template.resources_of_type(PolicyProperties::TYPE).len(),
                1,
                "stack {}",
                stack.id
            );
            assert_eq!(
                template.resources_of_type(UrlProperties::TYPE).len(),
                1,
                "stack {}",
                stack.id
            );
            assert_eq!(template.outputs.len(), 1, "stack {}", stack.id);
        }
    }

    #[test]
    fn test_should_prefix_function_names_with_environment() {
        let stacks = synthesize_all(&alice_registry(), &playground_layout()).unwrap();

        for (stack, expected) in stacks.iter().zip([
            "alice-playground-lambda-api",
            "beta-playground-lambda-api",
            "prod-playground-lambda-api",
        ]) {
            let id = stack.template.resources_of_type(FunctionProperties::TYPE)[0];
            let function = &stack.template.resources[id];
            assert_eq!(function.properties["FunctionName"], expected);
        }
    }

    #[test]
    fn test_should_export_each_url_under_hyphenated_name() {
        let stacks = synthesize_all(&alice_registry(), &playground_layout()).unwrap();

        let beta = &stacks[1];
        let output = beta.template.outputs.values().next().unwrap();
        assert_eq!(
            output.export.as_ref().unwrap().name,
            "beta-playground-lambda-api-url"
        );
    }

    #[test]
    fn test_should_degrade_missing_variables_to_undefined_names() {
        let registry = EnvironmentRegistry::from_lookup(|_| None).unwrap();
        let stacks = synthesize_all(&registry, &playground_layout()).unwrap();

        assert_eq!(stacks[0].id, "undefined-playground-api-stack");
        let id = stacks[0]
            .template
            .resources_of_type(FunctionProperties::TYPE)[0];
        let function = &stacks[0].template.resources[id];
        assert_eq!(
            function.properties["Code"]["S3Bucket"],
            "playstack-assets-undefined-us-west-2"
        );
    }

    #[test]
    fn test_should_reject_developer_named_like_fixed_environment() {
        let err = EnvironmentRegistry::from_lookup(|key| match key {
            "USER" => Some("prod".to_owned()),
            _ => None,
        })
        .unwrap_err();

        assert!(matches!(
            err,
            PlaystackError::DuplicateEnvironment(name) if name == "prod"
        ));
    }

    #[test]
    fn test_should_declare_tables_only_in_shared_environments() {
        let stacks = synthesize_all(&alice_registry(), &playground_layout()).unwrap();

        let declared: Vec<_> = stacks
            .iter()
            .map(|s| s.template.resources_of_type(TableProperties::TYPE).len())
            .collect();
        assert_eq!(declared, vec![0, 1, 1]);
    }
}
