//! Tier policy co-selection across the synthesized environments.

#[cfg(test)]
mod tests {
    use playstack_cfn::codedeploy::DeploymentGroupProperties;
    use playstack_cfn::iam::PolicyProperties;
    use playstack_cfn::lambda::{AliasProperties, PermissionProperties, UrlProperties};
    use playstack_cfn::template::Template;
    use playstack_constructs::synthesize_all;

    use crate::{alice_registry, playground_layout};

    fn templates() -> (Template, Template, Template) {
        let mut stacks = synthesize_all(&alice_registry(), &playground_layout())
            .unwrap()
            .into_iter();
        let dev = stacks.next().unwrap().template;
        let beta = stacks.next().unwrap().template;
        let prod = stacks.next().unwrap().template;
        (dev, beta, prod)
    }

    fn rollout_of(template: &Template) -> String {
        let id = template.resources_of_type(DeploymentGroupProperties::TYPE)[0];
        template.resources[id].properties["DeploymentConfigName"]
            .as_str()
            .unwrap()
            .to_owned()
    }

    fn auth_of(template: &Template) -> String {
        let id = template.resources_of_type(UrlProperties::TYPE)[0];
        template.resources[id].properties["AuthType"]
            .as_str()
            .unwrap()
            .to_owned()
    }

    #[test]
    fn test_should_cut_over_immediately_only_in_development() {
        let (dev, beta, prod) = templates();
        assert_eq!(rollout_of(&dev), "CodeDeployDefault.LambdaAllAtOnce");
        assert_eq!(
            rollout_of(&beta),
            "CodeDeployDefault.LambdaCanary10Percent10Minutes"
        );
        assert_eq!(
            rollout_of(&prod),
            "CodeDeployDefault.LambdaCanary10Percent10Minutes"
        );
    }

    #[test]
    fn test_should_open_the_endpoint_only_in_development() {
        let (dev, beta, prod) = templates();
        assert_eq!(auth_of(&dev), "NONE");
        assert_eq!(auth_of(&beta), "AWS_IAM");
        assert_eq!(auth_of(&prod), "AWS_IAM");

        // The public-invoke permission tracks the open endpoint exactly.
        assert_eq!(dev.resources_of_type(PermissionProperties::TYPE).len(), 1);
        assert!(beta.resources_of_type(PermissionProperties::TYPE).is_empty());
        assert!(prod.resources_of_type(PermissionProperties::TYPE).is_empty());
    }

    #[test]
    fn test_should_target_the_live_alias_everywhere() {
        let (dev, beta, prod) = templates();
        for template in [&dev, &beta, &prod] {
            let id = template.resources_of_type(AliasProperties::TYPE)[0];
            assert_eq!(template.resources[id].properties["Name"], "live");

            let group_id = template.resources_of_type(DeploymentGroupProperties::TYPE)[0];
            assert_eq!(template.resources[group_id].depends_on, vec![id.to_owned()]);
        }
    }

    #[test]
    fn test_should_grant_reused_tables_in_development() {
        let (dev, _, _) = templates();

        let grant_id = dev.resources_of_type(PolicyProperties::TYPE)[0];
        let statement = &dev.resources[grant_id].properties["PolicyDocument"]["Statement"][0];
        assert_eq!(
            statement["Resource"][0],
            "arn:aws:dynamodb:us-west-2:123456789012:table/Account"
        );
        assert_eq!(
            statement["Resource"][1],
            "arn:aws:dynamodb:us-west-2:123456789012:table/Account/index/*"
        );
    }

    #[test]
    fn test_should_grant_declared_tables_through_intrinsics_in_production() {
        let (_, _, prod) = templates();

        let grant_id = prod.resources_of_type(PolicyProperties::TYPE)[0];
        let statement = &prod.resources[grant_id].properties["PolicyDocument"]["Statement"][0];
        assert_eq!(
            statement["Resource"][0]["Fn::GetAtt"],
            serde_json::json!(["AccountTable", "Arn"])
        );
        // Index access joins the wildcard onto the intrinsic ARN.
        assert!(statement["Resource"][1]["Fn::Join"].is_array());
    }
}
