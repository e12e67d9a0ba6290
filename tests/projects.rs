use csproj_rs::{MsBuildProject, ProjectCondition};

/// A classic (pre-SDK) project with the MSBuild 2003 namespace.
const LEGACY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Project ToolsVersion="15.0" xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <Import Project="$(MSBuildExtensionsPath)\$(MSBuildToolsVersion)\Microsoft.Common.props" Condition="Exists('$(MSBuildExtensionsPath)\$(MSBuildToolsVersion)\Microsoft.Common.props')" />
  <PropertyGroup>
    <Configuration Condition=" '$(Configuration)' == '' ">Debug</Configuration>
    <Platform Condition=" '$(Platform)' == '' ">AnyCPU</Platform>
    <OutputType>WinExe</OutputType>
    <RootNamespace>Legacy.Tool</RootNamespace>
    <AssemblyName>Legacy.Tool</AssemblyName>
    <TargetFrameworkVersion>v4.6.1</TargetFrameworkVersion>
  </PropertyGroup>
  <PropertyGroup Condition=" '$(Configuration)|$(Platform)' == 'Debug|AnyCPU' ">
    <PlatformTarget>AnyCPU</PlatformTarget>
    <DebugSymbols>true</DebugSymbols>
    <OutputPath>bin\Debug\</OutputPath>
  </PropertyGroup>
  <PropertyGroup Condition=" '$(Configuration)|$(Platform)' == 'Release|x64' ">
    <PlatformTarget>x64</PlatformTarget>
    <OutputPath>bin\x64\Release\</OutputPath>
  </PropertyGroup>
  <ItemGroup>
    <Compile Include="Program.cs" />
  </ItemGroup>
</Project>
"#;

/// An SDK-style project without a namespace.
const SDK: &str = r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <TargetFrameworks>netcoreapp2.0;net45</TargetFrameworks>
    <TargetFramework>net8.0</TargetFramework>
  </PropertyGroup>
  <PropertyGroup Condition="'$(Configuration)' == 'Release'">
    <OutputType>Exe</OutputType>
    <PlatformTarget>x86</PlatformTarget>
  </PropertyGroup>
</Project>
"#;

#[test]
fn legacy_project_properties() {
    let doc = roxmltree::Document::parse(LEGACY).unwrap();
    let project = MsBuildProject::new(Some(&doc)).unwrap();

    assert_eq!(
        project.namespace(),
        Some("http://schemas.microsoft.com/developer/msbuild/2003")
    );
    assert_eq!(project.output_type(), "WinExe");
    assert_eq!(project.assembly_name().as_deref(), Some("Legacy.Tool"));
    assert_eq!(project.property("RootNamespace").as_deref(), Some("Legacy.Tool"));
    assert_eq!(project.target_frameworks(), ["v4.6.1"]);
}

#[test]
fn legacy_project_configurations() {
    let doc = roxmltree::Document::parse(LEGACY).unwrap();
    let project = MsBuildProject::from(&doc);

    assert_eq!(project.platform_target("Debug", "AnyCPU"), "AnyCPU");
    assert_eq!(project.platform_target("Release", "x64"), "x64");
    assert_eq!(project.platform_target("Release", "AnyCPU"), "AnyCPU");
    assert_eq!(project.output_path("Debug", "AnyCPU").as_deref(), Some(r"bin\Debug\"));
    assert_eq!(project.output_path("Release", "x64").as_deref(), Some(r"bin\x64\Release\"));
    assert_eq!(project.output_path("Release", "AnyCPU").as_deref(), None);
    assert_eq!(
        project.configurations(),
        vec![
            ("Debug".to_string(), "AnyCPU".to_string()),
            ("Release".to_string(), "x64".to_string()),
        ]
    );
}

#[test]
fn sdk_project_properties() {
    let doc = roxmltree::Document::parse(SDK).unwrap();
    let project = MsBuildProject::from(&doc);

    assert_eq!(project.namespace(), None);
    // The Release group is conditioned, so it never supplies OutputType.
    assert_eq!(project.output_type(), "Library");
    assert_eq!(project.assembly_name().as_deref(), None);
    assert_eq!(project.target_frameworks(), ["netcoreapp2.0", "net45"]);
    assert_eq!(project.platform_target("Release", "x86"), "AnyCPU");
    assert!(project.configurations().is_empty());
}

#[test]
fn condition_classification_is_public() {
    let doc = roxmltree::Document::parse(LEGACY).unwrap();
    let conditions: Vec<ProjectCondition> = doc
        .root_element()
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "PropertyGroup")
        .map(|n| ProjectCondition::parse(n.attribute("Condition")))
        .collect();

    assert_eq!(
        conditions,
        vec![
            ProjectCondition::Unconditioned,
            ProjectCondition::ConfigurationPlatformEquals("Debug|AnyCPU".into()),
            ProjectCondition::ConfigurationPlatformEquals("Release|x64".into()),
        ]
    );
}
