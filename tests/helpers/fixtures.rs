//! Descriptor and rule fixtures.

use frankdoc::rules::RuleRecord;
use frankdoc::{
    ClassDescriptor, CompilerOptions, DescriptorSet, EnumDescriptor, MemberDescriptor, Model, RoleRuleTable, compile,
};

pub const FRANK: &str = "org.frank";

/// Qualified name in the fixture package.
pub fn frank(simple: &str) -> String {
    format!("{}.{}", FRANK, simple)
}

/// A text setter.
pub fn setter(name: &str) -> MemberDescriptor {
    MemberDescriptor::new(name, "String")
}

/// A member taking `type_name`.
pub fn member(name: &str, type_name: &str) -> MemberDescriptor {
    MemberDescriptor::new(name, type_name)
}

/// Build a rule table from (pattern, object method, text method) triples.
pub fn rules(records: &[(&str, Option<&str>, Option<&str>)]) -> RoleRuleTable {
    let records: Vec<RuleRecord> = records
        .iter()
        .map(|(pattern, object, text)| RuleRecord {
            pattern: pattern.to_string(),
            register_method: object.map(str::to_string),
            register_text_method: text.map(str::to_string),
        })
        .collect();
    RoleRuleTable::from_records(&records)
}

/// Object rules from (pattern, method) pairs.
pub fn object_rules(records: &[(&str, &str)]) -> RoleRuleTable {
    let records: Vec<(&str, Option<&str>, Option<&str>)> =
        records.iter().map(|(pattern, method)| (*pattern, Some(*method), None)).collect();
    rules(&records)
}

/// Compile every class of `set`.
pub fn compile_all(set: &DescriptorSet, rules: &RoleRuleTable) -> Model {
    compile(set, rules, &CompilerOptions::default()).expect("compilation succeeds")
}

/// Compile with one root.
pub fn compile_rooted(set: &DescriptorSet, rules: &RoleRuleTable, root: &str) -> Model {
    compile(set, rules, &CompilerOptions::default().with_root(root)).expect("compilation succeeds")
}

// ============================================================================
// A SMALL ADAPTER FRAMEWORK
// ============================================================================

pub fn frank_rules() -> RoleRuleTable {
    rules(&[
        ("configuration", None, None),
        ("configuration/adapter", Some("registerAdapter"), None),
        ("*/pipeline", Some("setPipeline"), None),
        ("*/pipe", Some("addPipe"), None),
        ("*/receiver", Some("registerReceiver"), None),
        ("*/listener", Some("setListener"), None),
        ("*/forward", Some("registerForward"), None),
        ("*/param", Some("addParameter"), None),
        ("*/note", None, Some("addNote")),
    ])
}

/// Configuration → Adapter → PipeLine → IPipe, Adapter → Receiver → IListener.
pub fn frank_descriptors() -> DescriptorSet {
    DescriptorSet::new()
        .with_class(
            ClassDescriptor::class(frank("Configuration"))
                .with_member(member("registerAdapter", &frank("Adapter")))
                .with_member(setter("addNote")),
        )
        .with_class(
            ClassDescriptor::class(frank("Adapter"))
                .with_description("Receives messages and runs them through a pipeline")
                .with_member(setter("setName").with_documentation("Name of the adapter"))
                .with_member(setter("setDescription"))
                .with_member(member("setPipeline", &frank("PipeLine")).mandatory())
                .with_member(member("registerReceiver", &frank("Receiver"))),
        )
        .with_class(
            ClassDescriptor::class(frank("PipeLine"))
                .with_member(setter("setFirstPipe"))
                .with_member(member("addPipe", &frank("IPipe"))),
        )
        .with_class(
            ClassDescriptor::class(frank("Receiver"))
                .with_member(setter("setName"))
                .with_member(member("setListener", &frank("IListener"))),
        )
        .with_class(
            ClassDescriptor::interface(frank("IPipe"))
                .with_group("Pipes", 1)
                .with_member(setter("setName")),
        )
        .with_class(
            ClassDescriptor::class(frank("AbstractPipe"))
                .abstract_class()
                .with_interface(frank("IPipe"))
                .with_member(setter("setName").with_documentation("Name of the pipe"))
                .with_member(member("setActive", "boolean").with_default("true"))
                .with_member(member("registerForward", &frank("Forward")))
                .with_member(member("addParameter", &frank("Parameter"))),
        )
        .with_class(
            ClassDescriptor::class(frank("EchoPipe"))
                .with_parent(frank("AbstractPipe"))
                .with_member(member("setStrict", "boolean")),
        )
        .with_class(
            ClassDescriptor::class(frank("FixedResultPipe"))
                .with_parent(frank("AbstractPipe"))
                .with_member(setter("setReturnString"))
                .with_member(setter("setName")),
        )
        .with_class(ClassDescriptor::interface(frank("IListener")).with_group("Listeners", 2))
        .with_class(
            ClassDescriptor::class(frank("JavaListener"))
                .with_interface(frank("IListener"))
                .with_member(setter("setName"))
                .with_member(member("setMode", &frank("ListenerMode")).with_default("SYNC")),
        )
        .with_class(
            ClassDescriptor::class(frank("Forward"))
                .with_member(setter("setName"))
                .with_member(setter("setPath")),
        )
        .with_class(
            ClassDescriptor::class(frank("Parameter"))
                .with_member(setter("setName"))
                .with_member(setter("setValue"))
                .with_member(member("setType", &frank("ParameterType")).with_default("STRING")),
        )
        .with_enum(EnumDescriptor::new(frank("ListenerMode")).with_value("SYNC").with_value("ASYNC"))
        .with_enum(EnumDescriptor::new(frank("ParameterType")).with_value("STRING").with_value("INTEGER"))
}

pub fn compile_frank() -> Model {
    compile_rooted(&frank_descriptors(), &frank_rules(), &frank("Configuration"))
}
