//! Compilation of a validated parameter set into the job flow document.
//!
//! Every builder here appends parameters in a fixed order, so compiling the
//! same input twice yields byte-identical documents.

use crate::params::{keys, ParamSet, ParamValue, Phase, Task};

use super::component::{Component, ComponentClass, FlowSpec, Params};

// Two characters, backslash then t. The reader resolves the escape itself.
const FIELD_SEPARATOR: &str = "\\t";

/// File stem the SVM trainer writes its artifacts under.
///
/// The trainer leaves three files next to each other and the classifier
/// locates them by fixed suffix, so the suffixes live here and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputStem<'a>(&'a str);

impl<'a> OutputStem<'a> {
    pub fn new(stem: &'a str) -> Self {
        Self(stem)
    }

    pub fn model_file(&self) -> String {
        format!("{}.model", self.0)
    }

    pub fn labels_file(&self) -> String {
        format!("{}.labels", self.0)
    }

    pub fn range_file(&self) -> String {
        format!("{}.range", self.0)
    }
}

/// Compiles a validated parameter set into the job flow document.
///
/// # Panics
///
/// Panics when `params` did not pass [`validate`](crate::rules::validate)
/// first: a missing or misshapen key here is a caller bug, not user input
/// to be reported.
pub fn compile(params: &ParamSet) -> FlowSpec {
    let task = match params.task() {
        Some(task) => task,
        None => panic!("compile called with unvalidated parameters: missing or unknown task"),
    };
    let phase = match params.phase() {
        Some(phase) => phase,
        None => panic!("compile called with unvalidated parameters: missing or unknown phase"),
    };

    let reader = collection_reader(params);
    let stores = data_stores(params, task, phase);
    let analyzer = match phase {
        Phase::Feature => feature_analyzer(params, task),
        Phase::Learn => learner(params, task),
        Phase::Evaluate => evaluator(params, task),
        Phase::Classify => batch_classifier(params, task),
    };

    FlowSpec {
        collection_reader: reader,
        collection_analyzer: analyzer,
        data_stores: stores,
    }
}

fn collection_reader(params: &ParamSet) -> Component {
    let mut config = Params::new()
        .with("file_name", required(params, keys::INPUT_FILE))
        .with("separator", FIELD_SEPARATOR)
        .with(keys::ID_FIELD, required(params, keys::ID_FIELD))
        .with(keys::TEXT_FIELD, required(params, keys::TEXT_FIELD));
    let class = match params.get(keys::LABEL_FIELD) {
        Some(label_field) => {
            config.set(keys::LABEL_FIELD, label_field);
            ComponentClass::TsvCategorizedTextCollectionReader
        }
        None => ComponentClass::TsvIdentifiableTextCollectionReader,
    };
    Component::new(class, config)
}

fn data_stores(params: &ParamSet, task: Task, phase: Phase) -> Vec<Component> {
    let class = if task == Task::Quiet && phase == Phase::Learn {
        ComponentClass::SerializationStore
    } else {
        ComponentClass::FlatFileStore
    };
    vec![Component::new(
        class,
        Params::new().with("file_name", required(params, keys::DATA_STORE)),
    )]
}

fn feature_analyzer(params: &ParamSet, task: Task) -> Component {
    let mut config = Params::new()
        .with("tokenizer", tokenizer())
        .with("normalizers", normalizers())
        .with("min_df", 3i64);
    copy_if_present(params, &mut config, keys::TARGET_CLASS);
    // QuIET consumes signed BNS scores; the SVM trainer wants absolute values.
    config.set(
        "use_absolute_values",
        match task {
            Task::Quiet => false,
            Task::Svm => true,
        },
    );
    match params.get(keys::MAX_FEATURE_SIZE) {
        Some(value) => config.set(keys::MAX_FEATURE_SIZE, value),
        None => config.set(keys::MAX_FEATURE_SIZE, 40_000i64),
    }
    match params.get(keys::MIN_FEATURE_WEIGHT) {
        Some(value) => config.set(keys::MIN_FEATURE_WEIGHT, value),
        None => config.set(keys::MIN_FEATURE_WEIGHT, 0.01),
    }
    Component::new(ComponentClass::BnsWeightCalculator, config)
}

fn learner(params: &ParamSet, task: Task) -> Component {
    match task {
        Task::Quiet => quiet_learner(params),
        Task::Svm => svm_learner(params),
    }
}

fn quiet_learner(params: &ParamSet) -> Component {
    let mut config = Params::new()
        .with(
            "features",
            features_source(required_first(params, keys::FEATURE_FILE)),
        )
        .with("generate_negative_queries", false)
        .with("batch_size", 10_000i64)
        .with("min_precision", 0.95)
        .with("min_tp", 5i64);
    copy_if_present(params, &mut config, keys::NUMBER_OF_THREADS);
    copy_if_present(params, &mut config, keys::TARGET_CLASS);
    if let Some(index_dir) = params.get(keys::INDEX_DIR) {
        config.set(keys::INDEX_DIR, index_dir);
        config.set("overwrite", true);
    }
    copy_if_present(params, &mut config, keys::SAMPLE);
    Component::new(ComponentClass::QueryExtractorCollectionAnalyzer, config)
}

fn svm_learner(params: &ParamSet) -> Component {
    let mut config = Params::new()
        .with("find_best_parameters", true)
        .with(
            "representer",
            representer(required_first(params, keys::FEATURE_FILE), None),
        );
    copy_if_present(params, &mut config, keys::TARGET_CLASS);
    copy_if_present(params, &mut config, keys::NUMBER_OF_THREADS);
    copy_if_present(params, &mut config, keys::SAMPLE);
    Component::new(ComponentClass::LibSvmTrainer, config)
}

fn evaluator(params: &ParamSet, task: Task) -> Component {
    match task {
        Task::Quiet => quiet_evaluator(params),
        Task::Svm => svm_evaluator(params),
    }
}

fn quiet_evaluator(params: &ParamSet) -> Component {
    let analyzer = Component::new(
        ComponentClass::HummingBirdAnalyzer,
        Params::new().with("model", model_loader(required_first(params, keys::QUIET_MODEL))),
    );
    // target_class is accepted for this phase but never forwarded.
    let config = Params::new()
        .with("min_threshold", 0.005)
        .with("max_threshold", 1.0)
        .with("threshold_step", 0.005)
        .with("analyzer", analyzer);
    Component::new(ComponentClass::ClassifierEvaluator, config)
}

fn svm_evaluator(params: &ParamSet) -> Component {
    let stem = OutputStem::new(required_first(params, keys::SVM_OUTPUT_STEM));
    let analyzer = svm_text_classifier(required_first(params, keys::FEATURE_FILE), &stem);
    let mut config = Params::new()
        .with("min_threshold", 0.05)
        .with("max_threshold", 1.0)
        .with("threshold_step", 0.05)
        .with("analyzer", analyzer);
    copy_if_present(params, &mut config, keys::TARGET_CLASS);
    Component::new(ComponentClass::ClassifierEvaluator, config)
}

fn batch_classifier(params: &ParamSet, task: Task) -> Component {
    match task {
        Task::Quiet => quiet_batch_classifier(params),
        Task::Svm => svm_batch_classifier(params),
    }
}

fn quiet_batch_classifier(params: &ParamSet) -> Component {
    let models: Vec<Component> = required_list(params, keys::QUIET_MODEL)
        .iter()
        .map(|model| model_loader(model))
        .collect();
    let mut config = Params::new().with("models", models);
    copy_if_present(params, &mut config, keys::NUMBER_OF_THREADS);
    Component::new(ComponentClass::QuietCollectionAnalyzer, config)
}

fn svm_batch_classifier(params: &ParamSet) -> Component {
    let analyzers: Vec<Component> = required_list(params, keys::FEATURE_FILE)
        .iter()
        .zip(required_list(params, keys::SVM_OUTPUT_STEM))
        .map(|(feature_file, stem)| svm_text_classifier(feature_file, &OutputStem::new(stem)))
        .collect();
    let mut multi = Params::new().with("analyzers", analyzers);
    // The thread count rides on the multi-model wrapper, not the outer analyzer.
    copy_if_present(params, &mut multi, keys::NUMBER_OF_THREADS);
    Component::new(
        ComponentClass::ClassifierCollectionAnalyzer,
        Params::new().with(
            "analyzer",
            Component::new(ComponentClass::MultiModelClassifier, multi),
        ),
    )
}

fn svm_text_classifier(feature_file: &str, stem: &OutputStem<'_>) -> Component {
    let config = Params::new()
        .with("model", resource_reader(stem.model_file()))
        .with("labels", resource_reader(stem.labels_file()))
        .with(
            "representer",
            representer(feature_file, Some(stem.range_file())),
        );
    Component::new(ComponentClass::LibSvmTextClassifier, config)
}

fn representer(feature_file: &str, range_file: Option<String>) -> Component {
    let mut config = Params::new()
        .with("normalize_by_length", true)
        .with("features", features_source(feature_file))
        .with("tokenizer", tokenizer())
        .with("normalizers", normalizers());
    if let Some(range_file) = range_file {
        config.set(
            "scaler",
            Component::new(
                ComponentClass::ValueScaler,
                Params::new().with("file_name", range_file),
            ),
        );
    }
    Component::new(ComponentClass::TfFeatureWeightTextRepresenter, config)
}

fn resource_reader(file_name: String) -> Component {
    Component::new(
        ComponentClass::ResourceReader,
        Params::new().with("file_name", file_name),
    )
}

fn features_source(feature_file: &str) -> Component {
    Component::new(
        ComponentClass::Features,
        Params::new().with("file_name", feature_file),
    )
}

fn model_loader(model_file: &str) -> Component {
    Component::new(
        ComponentClass::HummingBirdModelLoader,
        Params::new().with("file_name", model_file),
    )
}

fn tokenizer() -> Component {
    Component::bare(ComponentClass::RegexpTokenizerStream)
}

// Order matters: later stages assume markup is gone and case is folded.
fn normalizers() -> Vec<Component> {
    vec![
        Component::bare(ComponentClass::MarkupRemover),
        Component::bare(ComponentClass::CaseNormalizer),
        Component::bare(ComponentClass::NumberNormalizer),
    ]
}

fn required<'a>(params: &'a ParamSet, key: &str) -> &'a ParamValue {
    match params.get(key) {
        Some(value) => value,
        None => panic!("compile called with unvalidated parameters: missing {key}"),
    }
}

fn required_list<'a>(params: &'a ParamSet, key: &str) -> &'a [String] {
    match required(params, key).as_list() {
        Some(list) => list,
        None => panic!("compile called with unvalidated parameters: {key} is not a list"),
    }
}

fn required_first<'a>(params: &'a ParamSet, key: &str) -> &'a str {
    match required_list(params, key).first() {
        Some(first) => first,
        None => panic!("compile called with unvalidated parameters: {key} is empty"),
    }
}

fn copy_if_present(params: &ParamSet, config: &mut Params, key: &'static str) {
    if let Some(value) = params.get(key) {
        config.set(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::component::ConfigValue;

    fn component(value: Option<&ConfigValue>) -> &Component {
        match value {
            Some(ConfigValue::Component(component)) => component,
            other => panic!("expected a component, got {other:?}"),
        }
    }

    fn components(value: Option<&ConfigValue>) -> &[Component] {
        match value {
            Some(ConfigValue::Components(components)) => components,
            other => panic!("expected a component list, got {other:?}"),
        }
    }

    fn reader_params(task: Task, phase: Phase) -> ParamSet {
        ParamSet::new()
            .with(keys::TASK, task.name())
            .with(keys::PHASE, phase.name())
            .with(keys::INPUT_FILE, "training.tsv")
            .with(keys::ID_FIELD, 0i64)
            .with(keys::TEXT_FIELD, 1i64)
            .with(keys::DATA_STORE, "output.file")
    }

    #[test]
    fn test_collection_reader_switches_kind_on_label_field() {
        let unlabeled = reader_params(Task::Svm, Phase::Classify);
        let reader = collection_reader(&unlabeled);
        assert_eq!(
            reader.class_name,
            ComponentClass::TsvIdentifiableTextCollectionReader
        );
        assert_eq!(
            reader.parameters.keys().collect::<Vec<_>>(),
            vec!["file_name", "separator", "id_field", "text_field"]
        );
        assert_eq!(
            reader.parameters.get("separator"),
            Some(&ConfigValue::Str("\\t".to_string()))
        );

        let labeled = unlabeled.with(keys::LABEL_FIELD, 2i64);
        let reader = collection_reader(&labeled);
        assert_eq!(
            reader.class_name,
            ComponentClass::TsvCategorizedTextCollectionReader
        );
        assert_eq!(
            reader.parameters.get(keys::LABEL_FIELD),
            Some(&ConfigValue::Int(2))
        );
    }

    #[test]
    fn test_data_store_kind_depends_on_task_and_phase() {
        let params = ParamSet::new().with(keys::DATA_STORE, "output_file.tsv");
        for task in Task::ALL {
            for phase in Phase::ALL {
                let stores = data_stores(&params, task, phase);
                assert_eq!(stores.len(), 1);
                let expected = if task == Task::Quiet && phase == Phase::Learn {
                    ComponentClass::SerializationStore
                } else {
                    ComponentClass::FlatFileStore
                };
                assert_eq!(stores[0].class_name, expected);
                assert_eq!(
                    stores[0].parameters.get("file_name"),
                    Some(&ConfigValue::Str("output_file.tsv".to_string()))
                );
            }
        }
    }

    #[test]
    fn test_feature_analyzer_svm_with_explicit_settings() {
        let params = ParamSet::new()
            .with(keys::MAX_FEATURE_SIZE, 10_000i64)
            .with(keys::MIN_FEATURE_WEIGHT, 0.05)
            .with(keys::TARGET_CLASS, "test_class");
        let analyzer = feature_analyzer(&params, Task::Svm);
        assert_eq!(analyzer.class_name, ComponentClass::BnsWeightCalculator);

        let config = &analyzer.parameters;
        assert_eq!(
            config.keys().collect::<Vec<_>>(),
            vec![
                "tokenizer",
                "normalizers",
                "min_df",
                "target_class",
                "use_absolute_values",
                "max_feature_size",
                "min_feature_weight",
            ]
        );
        assert_eq!(config.get("min_df"), Some(&ConfigValue::Int(3)));
        assert_eq!(
            config.get(keys::TARGET_CLASS),
            Some(&ConfigValue::Str("test_class".to_string()))
        );
        assert_eq!(
            config.get("use_absolute_values"),
            Some(&ConfigValue::Bool(true))
        );
        assert_eq!(
            config.get(keys::MAX_FEATURE_SIZE),
            Some(&ConfigValue::Int(10_000))
        );
        assert_eq!(
            config.get(keys::MIN_FEATURE_WEIGHT),
            Some(&ConfigValue::Float(0.05))
        );
        assert_eq!(
            component(config.get("tokenizer")).class_name,
            ComponentClass::RegexpTokenizerStream
        );
        let stages = components(config.get("normalizers"));
        assert_eq!(
            stages.iter().map(|n| n.class_name).collect::<Vec<_>>(),
            vec![
                ComponentClass::MarkupRemover,
                ComponentClass::CaseNormalizer,
                ComponentClass::NumberNormalizer,
            ]
        );
    }

    #[test]
    fn test_feature_analyzer_defaults() {
        let svm = feature_analyzer(&ParamSet::new(), Task::Svm);
        assert_eq!(
            svm.parameters.get(keys::MAX_FEATURE_SIZE),
            Some(&ConfigValue::Int(40_000))
        );
        assert_eq!(
            svm.parameters.get(keys::MIN_FEATURE_WEIGHT),
            Some(&ConfigValue::Float(0.01))
        );
        assert_eq!(
            svm.parameters.get("use_absolute_values"),
            Some(&ConfigValue::Bool(true))
        );
        assert_eq!(svm.parameters.get(keys::TARGET_CLASS), None);

        let quiet = feature_analyzer(&ParamSet::new(), Task::Quiet);
        assert_eq!(
            quiet.parameters.get("use_absolute_values"),
            Some(&ConfigValue::Bool(false))
        );
    }

    #[test]
    fn test_quiet_learner_defaults() {
        let params = ParamSet::new().with(keys::FEATURE_FILE, vec!["features.tsv"]);
        let learner = quiet_learner(&params);
        assert_eq!(
            learner.class_name,
            ComponentClass::QueryExtractorCollectionAnalyzer
        );

        let config = &learner.parameters;
        let features = component(config.get("features"));
        assert_eq!(features.class_name, ComponentClass::Features);
        assert_eq!(
            features.parameters.get("file_name"),
            Some(&ConfigValue::Str("features.tsv".to_string()))
        );
        assert_eq!(
            config.get("generate_negative_queries"),
            Some(&ConfigValue::Bool(false))
        );
        assert_eq!(config.get("batch_size"), Some(&ConfigValue::Int(10_000)));
        assert_eq!(config.get("min_precision"), Some(&ConfigValue::Float(0.95)));
        assert_eq!(config.get("min_tp"), Some(&ConfigValue::Int(5)));
        assert_eq!(config.get(keys::NUMBER_OF_THREADS), None);
        assert_eq!(config.get(keys::INDEX_DIR), None);
        assert_eq!(config.get("overwrite"), None);
    }

    #[test]
    fn test_quiet_learner_index_dir_forces_overwrite() {
        let params = ParamSet::new()
            .with(keys::FEATURE_FILE, vec!["features.tsv"])
            .with(keys::TARGET_CLASS, "test_class")
            .with(keys::NUMBER_OF_THREADS, 10i64)
            .with(keys::INDEX_DIR, "/tmp/index")
            .with(keys::SAMPLE, 0.1);
        let config = quiet_learner(&params).parameters;
        assert_eq!(
            config.keys().collect::<Vec<_>>(),
            vec![
                "features",
                "generate_negative_queries",
                "batch_size",
                "min_precision",
                "min_tp",
                "number_of_threads",
                "target_class",
                "index_dir",
                "overwrite",
                "sample",
            ]
        );
        assert_eq!(
            config.get(keys::INDEX_DIR),
            Some(&ConfigValue::Str("/tmp/index".to_string()))
        );
        assert_eq!(config.get("overwrite"), Some(&ConfigValue::Bool(true)));
        assert_eq!(config.get(keys::SAMPLE), Some(&ConfigValue::Float(0.1)));
    }

    #[test]
    fn test_svm_learner_wraps_representer() {
        let params = ParamSet::new().with(keys::FEATURE_FILE, vec!["features.tsv"]);
        let learner = svm_learner(&params);
        assert_eq!(learner.class_name, ComponentClass::LibSvmTrainer);

        let config = &learner.parameters;
        assert_eq!(
            config.get("find_best_parameters"),
            Some(&ConfigValue::Bool(true))
        );
        let representer = component(config.get("representer"));
        assert_eq!(
            representer.class_name,
            ComponentClass::TfFeatureWeightTextRepresenter
        );
        assert_eq!(
            representer.parameters.get("normalize_by_length"),
            Some(&ConfigValue::Bool(true))
        );
        // No range file during training, so no scaler either.
        assert_eq!(representer.parameters.get("scaler"), None);
        assert_eq!(config.get(keys::SAMPLE), None);

        let with_extras = params
            .with(keys::TARGET_CLASS, "test_class")
            .with(keys::NUMBER_OF_THREADS, 20i64)
            .with(keys::SAMPLE, 0.2);
        let config = svm_learner(&with_extras).parameters;
        assert_eq!(
            config.get(keys::TARGET_CLASS),
            Some(&ConfigValue::Str("test_class".to_string()))
        );
        assert_eq!(
            config.get(keys::NUMBER_OF_THREADS),
            Some(&ConfigValue::Int(20))
        );
        assert_eq!(config.get(keys::SAMPLE), Some(&ConfigValue::Float(0.2)));
    }

    #[test]
    fn test_quiet_evaluator_wraps_single_model() {
        let params = ParamSet::new().with(keys::QUIET_MODEL, vec!["model.bin"]);
        let evaluator = quiet_evaluator(&params);
        assert_eq!(evaluator.class_name, ComponentClass::ClassifierEvaluator);

        let config = &evaluator.parameters;
        assert_eq!(config.get("min_threshold"), Some(&ConfigValue::Float(0.005)));
        assert_eq!(config.get("max_threshold"), Some(&ConfigValue::Float(1.0)));
        assert_eq!(
            config.get("threshold_step"),
            Some(&ConfigValue::Float(0.005))
        );
        let analyzer = component(config.get("analyzer"));
        assert_eq!(analyzer.class_name, ComponentClass::HummingBirdAnalyzer);
        let model = component(analyzer.parameters.get("model"));
        assert_eq!(model.class_name, ComponentClass::HummingBirdModelLoader);
        assert_eq!(
            model.parameters.get("file_name"),
            Some(&ConfigValue::Str("model.bin".to_string()))
        );
    }

    #[test]
    fn test_quiet_evaluator_does_not_forward_target_class() {
        let params = ParamSet::new()
            .with(keys::QUIET_MODEL, vec!["model.bin"])
            .with(keys::TARGET_CLASS, "test_class");
        let config = quiet_evaluator(&params).parameters;
        assert_eq!(config.get(keys::TARGET_CLASS), None);
    }

    #[test]
    fn test_svm_evaluator_tree() {
        let params = ParamSet::new()
            .with(keys::FEATURE_FILE, vec!["feature.tsv"])
            .with(keys::SVM_OUTPUT_STEM, vec!["svm_output"]);
        let evaluator = svm_evaluator(&params);
        assert_eq!(evaluator.class_name, ComponentClass::ClassifierEvaluator);

        let config = &evaluator.parameters;
        assert_eq!(config.get("min_threshold"), Some(&ConfigValue::Float(0.05)));
        assert_eq!(config.get("max_threshold"), Some(&ConfigValue::Float(1.0)));
        assert_eq!(config.get("threshold_step"), Some(&ConfigValue::Float(0.05)));
        assert_eq!(config.get(keys::TARGET_CLASS), None);

        let analyzer = component(config.get("analyzer"));
        assert_eq!(analyzer.class_name, ComponentClass::LibSvmTextClassifier);
        let model = component(analyzer.parameters.get("model"));
        assert_eq!(model.class_name, ComponentClass::ResourceReader);
        assert_eq!(
            model.parameters.get("file_name"),
            Some(&ConfigValue::Str("svm_output.model".to_string()))
        );
        let labels = component(analyzer.parameters.get("labels"));
        assert_eq!(
            labels.parameters.get("file_name"),
            Some(&ConfigValue::Str("svm_output.labels".to_string()))
        );
        let representer = component(analyzer.parameters.get("representer"));
        let scaler = component(representer.parameters.get("scaler"));
        assert_eq!(scaler.class_name, ComponentClass::ValueScaler);
        assert_eq!(
            scaler.parameters.get("file_name"),
            Some(&ConfigValue::Str("svm_output.range".to_string()))
        );
        let features = component(representer.parameters.get("features"));
        assert_eq!(
            features.parameters.get("file_name"),
            Some(&ConfigValue::Str("feature.tsv".to_string()))
        );

        let with_target = params.with(keys::TARGET_CLASS, "test_class");
        let config = svm_evaluator(&with_target).parameters;
        assert_eq!(
            config.get(keys::TARGET_CLASS),
            Some(&ConfigValue::Str("test_class".to_string()))
        );
    }

    #[test]
    fn test_output_stem_suffixes() {
        let stem = OutputStem::new("svm_output");
        assert_eq!(stem.model_file(), "svm_output.model");
        assert_eq!(stem.labels_file(), "svm_output.labels");
        assert_eq!(stem.range_file(), "svm_output.range");
    }

    #[test]
    fn test_svm_batch_classifier_zips_pairs() {
        let params = ParamSet::new()
            .with(keys::FEATURE_FILE, vec!["file1", "file2", "file3", "file4"])
            .with(keys::SVM_OUTPUT_STEM, vec!["stem1", "stem2", "stem3", "stem4"])
            .with(keys::NUMBER_OF_THREADS, 20i64);
        let outer = svm_batch_classifier(&params);
        assert_eq!(
            outer.class_name,
            ComponentClass::ClassifierCollectionAnalyzer
        );
        assert_eq!(outer.parameters.get(keys::NUMBER_OF_THREADS), None);

        let multi = component(outer.parameters.get("analyzer"));
        assert_eq!(multi.class_name, ComponentClass::MultiModelClassifier);
        assert_eq!(
            multi.parameters.get(keys::NUMBER_OF_THREADS),
            Some(&ConfigValue::Int(20))
        );

        let analyzers = components(multi.parameters.get("analyzers"));
        assert_eq!(analyzers.len(), 4);
        for (i, analyzer) in analyzers.iter().enumerate() {
            assert_eq!(analyzer.class_name, ComponentClass::LibSvmTextClassifier);
            let model = component(analyzer.parameters.get("model"));
            assert_eq!(
                model.parameters.get("file_name"),
                Some(&ConfigValue::Str(format!("stem{}.model", i + 1)))
            );
            let representer = component(analyzer.parameters.get("representer"));
            let features = component(representer.parameters.get("features"));
            assert_eq!(
                features.parameters.get("file_name"),
                Some(&ConfigValue::Str(format!("file{}", i + 1)))
            );
        }
    }

    #[test]
    fn test_quiet_batch_classifier_one_loader_per_model() {
        let params = ParamSet::new()
            .with(keys::QUIET_MODEL, vec!["model1", "model2", "model3"])
            .with(keys::NUMBER_OF_THREADS, 20i64);
        let classifier = quiet_batch_classifier(&params);
        assert_eq!(classifier.class_name, ComponentClass::QuietCollectionAnalyzer);
        assert_eq!(
            classifier.parameters.get(keys::NUMBER_OF_THREADS),
            Some(&ConfigValue::Int(20))
        );

        let models = components(classifier.parameters.get("models"));
        assert_eq!(models.len(), 3);
        for (i, model) in models.iter().enumerate() {
            assert_eq!(model.class_name, ComponentClass::HummingBirdModelLoader);
            assert_eq!(
                model.parameters.get("file_name"),
                Some(&ConfigValue::Str(format!("model{}", i + 1)))
            );
        }
    }

    #[test]
    fn test_compile_builds_all_three_sections() {
        let params = reader_params(Task::Svm, Phase::Feature).with(keys::LABEL_FIELD, 2i64);
        let spec = compile(&params);
        assert_eq!(
            spec.collection_reader.class_name,
            ComponentClass::TsvCategorizedTextCollectionReader
        );
        assert_eq!(
            spec.collection_analyzer.class_name,
            ComponentClass::BnsWeightCalculator
        );
        assert_eq!(spec.data_stores.len(), 1);
        assert_eq!(spec.data_stores[0].class_name, ComponentClass::FlatFileStore);
    }

    #[test]
    fn test_compile_dispatches_learner_by_task() {
        let svm = reader_params(Task::Svm, Phase::Learn)
            .with(keys::LABEL_FIELD, 2i64)
            .with(keys::FEATURE_FILE, vec!["features.tsv"]);
        assert_eq!(
            compile(&svm).collection_analyzer.class_name,
            ComponentClass::LibSvmTrainer
        );

        let quiet = reader_params(Task::Quiet, Phase::Learn)
            .with(keys::LABEL_FIELD, 2i64)
            .with(keys::FEATURE_FILE, vec!["features.tsv"])
            .with(keys::TARGET_CLASS, "spas");
        let spec = compile(&quiet);
        assert_eq!(
            spec.collection_analyzer.class_name,
            ComponentClass::QueryExtractorCollectionAnalyzer
        );
        assert_eq!(
            spec.data_stores[0].class_name,
            ComponentClass::SerializationStore
        );
    }

    #[test]
    fn test_compile_dispatches_evaluator_and_classifier_by_task() {
        let quiet_eval = reader_params(Task::Quiet, Phase::Evaluate)
            .with(keys::LABEL_FIELD, 2i64)
            .with(keys::QUIET_MODEL, vec!["model.bin"]);
        let analyzer = compile(&quiet_eval).collection_analyzer;
        assert_eq!(analyzer.class_name, ComponentClass::ClassifierEvaluator);
        assert_eq!(
            component(analyzer.parameters.get("analyzer")).class_name,
            ComponentClass::HummingBirdAnalyzer
        );

        let svm_classify = reader_params(Task::Svm, Phase::Classify)
            .with(keys::FEATURE_FILE, vec!["f1"])
            .with(keys::SVM_OUTPUT_STEM, vec!["s1"]);
        assert_eq!(
            compile(&svm_classify).collection_analyzer.class_name,
            ComponentClass::ClassifierCollectionAnalyzer
        );

        let quiet_classify =
            reader_params(Task::Quiet, Phase::Classify).with(keys::QUIET_MODEL, vec!["m1", "m2"]);
        assert_eq!(
            compile(&quiet_classify).collection_analyzer.class_name,
            ComponentClass::QuietCollectionAnalyzer
        );
    }

    #[test]
    #[should_panic(expected = "input_file")]
    fn test_compile_panics_without_required_key() {
        let params = ParamSet::new()
            .with(keys::TASK, "svm")
            .with(keys::PHASE, "feature");
        compile(&params);
    }

    #[test]
    #[should_panic(expected = "task")]
    fn test_compile_panics_without_task() {
        compile(&ParamSet::new());
    }
}
