use std::borrow::Cow;

use roxmltree::{Document, Node};
use thiserror::Error;
use tracing::trace;

use crate::condition::ProjectCondition;

/// `OutputType` reported when no unconditioned group sets one.
pub const DEFAULT_OUTPUT_TYPE: &str = "Library";

/// `PlatformTarget` reported when no matching configuration group sets one.
pub const DEFAULT_PLATFORM_TARGET: &str = "AnyCPU";

/// Property names consulted by [`MsBuildProject::target_frameworks`], in
/// priority order.
const TARGET_FRAMEWORK_PROPERTIES: [&str; 3] =
    ["TargetFrameworks", "TargetFramework", "TargetFrameworkVersion"];

// ═══════════════════════════════════════════════════════════════════════════════
//  Error
// ═══════════════════════════════════════════════════════════════════════════════

/// Failure to construct an [`MsBuildProject`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

// ═══════════════════════════════════════════════════════════════════════════════
//  MsBuildProject – read-only view over a parsed project document
// ═══════════════════════════════════════════════════════════════════════════════

/// Read-only queries over an already-parsed MSBuild project document.
///
/// Only the root's immediate `<PropertyGroup>` children are consulted.
/// Top-level properties come from groups without a `Condition`; per-build
/// properties come from groups conditioned on
/// `'$(Configuration)|$(Platform)' == '<Configuration>|<Platform>'`.
/// The first match in document order wins; groups are never merged and no
/// other condition shape is evaluated.
///
/// Element names are matched in the root element's default namespace,
/// captured once at construction.
///
/// # Example
/// ```
/// let xml = r#"<Project>
///   <PropertyGroup>
///     <OutputType>Exe</OutputType>
///     <TargetFrameworks>net8.0; net48</TargetFrameworks>
///   </PropertyGroup>
///   <PropertyGroup Condition="'$(Configuration)|$(Platform)' == 'Release|x64'">
///     <PlatformTarget>x64</PlatformTarget>
///   </PropertyGroup>
/// </Project>"#;
/// let doc = roxmltree::Document::parse(xml).unwrap();
/// let project = csproj_rs::MsBuildProject::from(&doc);
/// assert_eq!(project.output_type(), "Exe");
/// assert_eq!(project.target_frameworks(), ["net8.0", "net48"]);
/// assert_eq!(project.platform_target("Release", "x64"), "x64");
/// assert_eq!(project.platform_target("Debug", "x64"), "AnyCPU");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MsBuildProject<'a, 'input> {
    document: &'a Document<'input>,
    namespace: Option<&'a str>,
}

impl<'a, 'input> MsBuildProject<'a, 'input> {
    /// Wrap a parsed document.  Fails with [`ProjectError::InvalidArgument`]
    /// when no document is supplied.
    pub fn new(document: Option<&'a Document<'input>>) -> Result<Self, ProjectError> {
        let document = document
            .ok_or_else(|| ProjectError::InvalidArgument("document must not be null".into()))?;
        Ok(Self::from(document))
    }

    /// The root element's default namespace URI, if it declares one.
    pub fn namespace(&self) -> Option<&'a str> {
        self.namespace
    }

    // ─── Project-level properties ────────────────────────────────────────

    /// `<OutputType>` from the unconditioned groups, defaulting to
    /// [`DEFAULT_OUTPUT_TYPE`].
    pub fn output_type(&self) -> Cow<'a, str> {
        self.property("OutputType")
            .unwrap_or(Cow::Borrowed(DEFAULT_OUTPUT_TYPE))
    }

    /// `<AssemblyName>` from the unconditioned groups.
    pub fn assembly_name(&self) -> Option<Cow<'a, str>> {
        self.property("AssemblyName")
    }

    /// Target framework monikers, taken from the first of
    /// `<TargetFrameworks>`, `<TargetFramework>` and
    /// `<TargetFrameworkVersion>` that is present in an unconditioned group.
    ///
    /// The winning value is split on `;` and each token is trimmed.  Empty
    /// tokens are kept, so `"net8.0;"` yields `["net8.0", ""]`.
    pub fn target_frameworks(&self) -> Vec<String> {
        let groups = self.unconditioned_groups();
        TARGET_FRAMEWORK_PROPERTIES
            .iter()
            .find_map(|name| self.property_value(name, groups.iter().copied()))
            .map(|value| value.split(';').map(|tfm| tfm.trim().to_string()).collect())
            .unwrap_or_default()
    }

    /// Any property from the unconditioned groups, first match wins.
    pub fn property(&self, name: &str) -> Option<Cow<'a, str>> {
        self.property_value(name, self.unconditioned_groups())
    }

    // ─── Per-configuration properties ────────────────────────────────────

    /// `<PlatformTarget>` for the given configuration and platform,
    /// defaulting to [`DEFAULT_PLATFORM_TARGET`] whatever `platform` was
    /// requested.
    pub fn platform_target(&self, configuration: &str, platform: &str) -> Cow<'a, str> {
        self.property_for("PlatformTarget", configuration, platform)
            .unwrap_or(Cow::Borrowed(DEFAULT_PLATFORM_TARGET))
    }

    /// `<OutputPath>` for the given configuration and platform.
    pub fn output_path(&self, configuration: &str, platform: &str) -> Option<Cow<'a, str>> {
        self.property_for("OutputPath", configuration, platform)
    }

    /// Any property from the groups selected by
    /// `'$(Configuration)|$(Platform)' == '{configuration}|{platform}'`.
    pub fn property_for(
        &self,
        name: &str,
        configuration: &str,
        platform: &str,
    ) -> Option<Cow<'a, str>> {
        self.property_value(name, self.configuration_groups(configuration, platform))
    }

    /// The `(configuration, platform)` pairs that have a dedicated property
    /// group, in document order and without duplicates.
    ///
    /// Only recognized `'$(Configuration)|$(Platform)' == '…'` conditions
    /// contribute; a literal without a `|` is skipped.
    pub fn configurations(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = Vec::new();

        for pg in self.property_groups(|_| true) {
            let ProjectCondition::ConfigurationPlatformEquals(literal) =
                ProjectCondition::parse(pg.attribute("Condition"))
            else {
                continue;
            };
            let Some((configuration, platform)) = literal.split_once('|') else {
                continue;
            };
            let pair = (configuration.to_string(), platform.to_string());
            if !pairs.contains(&pair) {
                pairs.push(pair);
            }
        }

        pairs
    }

    // ─── Lookup primitives ───────────────────────────────────────────────

    fn unconditioned_groups(&self) -> Vec<Node<'a, 'input>> {
        self.property_groups(|pg| pg.attribute("Condition").is_none())
    }

    fn configuration_groups(&self, configuration: &str, platform: &str) -> Vec<Node<'a, 'input>> {
        let key = format!("{configuration}|{platform}");
        self.property_groups(|pg| ProjectCondition::parse(pg.attribute("Condition")).matches(&key))
    }

    /// The root's immediate `<PropertyGroup>` children accepted by
    /// `predicate`, in document order.
    fn property_groups<P>(&self, predicate: P) -> Vec<Node<'a, 'input>>
    where
        P: Fn(&Node<'a, 'input>) -> bool,
    {
        self.document
            .root_element()
            .children()
            .filter(|n| self.is_named(n, "PropertyGroup"))
            .filter(|n| predicate(n))
            .collect()
    }

    /// Text of the first `<name>` child found scanning `groups` in order.
    /// An element without text yields `Some("")`.
    fn property_value<I>(&self, name: &str, groups: I) -> Option<Cow<'a, str>>
    where
        I: IntoIterator<Item = Node<'a, 'input>>,
    {
        groups.into_iter().find_map(|pg| {
            pg.children()
                .find(|c| self.is_named(c, name))
                .map(element_text)
        })
    }

    fn is_named(&self, node: &Node, name: &str) -> bool {
        node.is_element()
            && node.tag_name().name() == name
            && node.tag_name().namespace() == self.namespace
    }
}

/// The concatenated text children of `node`, skipping comments and
/// processing instructions.  Borrows when there is a single text node.
fn element_text<'a>(node: Node<'a, '_>) -> Cow<'a, str> {
    let mut texts = node.children().filter(|n| n.is_text()).filter_map(|n| n.text());
    match (texts.next(), texts.next()) {
        (None, _) => Cow::Borrowed(""),
        (Some(only), None) => Cow::Borrowed(only),
        (Some(first), Some(second)) => {
            let mut joined = String::from(first);
            joined.push_str(second);
            joined.extend(texts);
            Cow::Owned(joined)
        }
    }
}

impl<'a, 'input> From<&'a Document<'input>> for MsBuildProject<'a, 'input> {
    fn from(document: &'a Document<'input>) -> Self {
        let namespace = document.root_element().lookup_namespace_uri(None);
        trace!("Project default namespace: {:?}", namespace);
        Self { document, namespace }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════════
