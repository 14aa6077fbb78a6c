use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        [solver]
        time_limit_seconds = 60
        backends = ["highs", "microlp"]

        [weights]
        categorical_penalty = 100.0

        [weights.numerical]
        Score = 0.5
    "#;

    let config = GroupingConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.time_limit(), Duration::from_secs(60));
    assert_eq!(
        config.solver.backends,
        vec![SolverBackend::Highs, SolverBackend::Microlp]
    );
    assert_eq!(config.weights.categorical_penalty, 100.0);
    assert_eq!(config.weights.numerical_weight("Score"), 0.5);
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        solver:
          time_limit_seconds: 2.5
          backends: [microlp]
        weights:
          numerical:
            Age: 3.0
    "#;

    let config = GroupingConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.time_limit(), Duration::from_millis(2500));
    assert_eq!(config.solver.backends, vec![SolverBackend::Microlp]);
    assert_eq!(
        config.weights.categorical_penalty,
        DEFAULT_CATEGORICAL_PENALTY
    );
    assert_eq!(config.weights.numerical_weight("Age"), 3.0);
}

#[test]
fn test_empty_document_uses_defaults() {
    let config = GroupingConfig::from_toml_str("").unwrap();
    assert_eq!(config, GroupingConfig::default());
    assert_eq!(config.time_limit(), Duration::from_secs(10));
    assert_eq!(config.solver.backends, SolverBackend::ALL.to_vec());
    assert_eq!(config.weights.categorical_penalty, 1e4);
}

#[test]
fn test_builder() {
    let config = GroupingConfig::new()
        .with_time_limit_seconds(5.0)
        .with_backends([SolverBackend::Microlp])
        .with_categorical_penalty(50.0)
        .with_numerical_weight("Score", 2.0);

    assert!(config.validate().is_ok());
    assert_eq!(config.time_limit(), Duration::from_secs(5));
    assert_eq!(config.weights.numerical_weight("Score"), 2.0);
}

#[test]
fn test_invalid_values_rejected() {
    let zero_time = "[solver]\ntime_limit_seconds = 0";
    assert!(matches!(
        GroupingConfig::from_toml_str(zero_time),
        Err(ConfigError::Invalid(_))
    ));

    let no_backends = "[solver]\nbackends = []";
    assert!(matches!(
        GroupingConfig::from_toml_str(no_backends),
        Err(ConfigError::Invalid(_))
    ));

    let negative_penalty = "[weights]\ncategorical_penalty = -1.0";
    assert!(matches!(
        GroupingConfig::from_toml_str(negative_penalty),
        Err(ConfigError::Invalid(_))
    ));

    let negative_weight = GroupingConfig::new().with_numerical_weight("Score", -2.0);
    assert!(negative_weight.validate().is_err());
}

#[test]
fn test_weights_section_is_objective_weights() {
    let config = GroupingConfig::from_toml_str("[weights]\ncategorical_penalty = 20.0").unwrap();
    let expected = ObjectiveWeights::new(20.0);
    assert_eq!(config.weights, expected);
    assert_eq!(ObjectiveWeights::default().categorical_penalty, DEFAULT_CATEGORICAL_PENALTY);

    // One set of rules: the model's own check, reported as a config error.
    let bad = GroupingConfig::new().with_numerical_weight("Age", f64::NAN);
    match bad.validate() {
        Err(ConfigError::Invalid(message)) => assert!(message.contains("Age")),
        other => panic!("expected invalid weight, got {:?}", other),
    }
    assert!(bad.weights.validate().is_err());
}

#[test]
fn test_unknown_backend_is_parse_error() {
    let toml = "[solver]\nbackends = [\"gurobi\"]";
    assert!(matches!(
        GroupingConfig::from_toml_str(toml),
        Err(ConfigError::Toml(_))
    ));
}

#[test]
fn test_missing_file() {
    let result = GroupingConfig::load("definitely/not/here/equigroup.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}
