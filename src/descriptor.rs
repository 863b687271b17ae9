//! The dev container descriptor (`devcontainer.json`).
//!
//! The descriptor is produced once by rendering a template and is then only
//! read. Everything here works on `serde_json::Value` so fields this tool
//! does not know about survive re-serialization untouched.

use crate::error::{CraftError, Result};
use crate::template::{render_template, tokens};
use serde_json::{Map, Value};

/// Feature identifier for running a separate Docker daemon inside the container.
pub const DOCKER_IN_DOCKER_FEATURE: &str = "ghcr.io/devcontainers/features/docker-in-docker:2";

/// Feature identifier for reusing the host's Docker daemon from the container.
pub const DOCKER_OUTSIDE_OF_DOCKER_FEATURE: &str =
    "ghcr.io/devcontainers/features/docker-outside-of-docker:1";

/// Values substituted into the descriptor template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorParams {
    pub name: String,
    pub ports: Vec<u16>,
    pub runtime_version: String,
    pub workspace: String,
}

/// Optional container-runtime capability offered during `create`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Variant 1.
    DockerInDocker,
    /// Variant 2.
    DockerOutsideOfDocker,
}

impl Capability {
    /// Map the numeric menu answer to a variant; anything but `2` is variant 1.
    pub fn from_choice(choice: &str) -> Self {
        match choice.trim() {
            "2" => Capability::DockerOutsideOfDocker,
            _ => Capability::DockerInDocker,
        }
    }

    pub fn feature_id(self) -> &'static str {
        match self {
            Capability::DockerInDocker => DOCKER_IN_DOCKER_FEATURE,
            Capability::DockerOutsideOfDocker => DOCKER_OUTSIDE_OF_DOCKER_FEATURE,
        }
    }
}

/// Render the descriptor template.
///
/// String values are JSON-escaped before substitution (the template wraps
/// them in quotes), and the port list is substituted as a JSON array, so the
/// output parses for any input.
pub fn render_descriptor(template: &str, params: &DescriptorParams) -> Result<String> {
    let ports = serde_json::to_string(&params.ports)
        .map_err(|e| CraftError::InvalidInput(format!("cannot encode ports: {}", e)))?;

    let values = tokens([
        ("NAME", json_string_body(&params.name)),
        ("PORTS", ports),
        ("PY_VER", json_string_body(&params.runtime_version)),
        ("WORKSPACE", json_string_body(&params.workspace)),
    ]);

    Ok(render_template(template, &values)?)
}

/// Parse descriptor text as JSON.
pub fn parse_descriptor(text: &str) -> Result<Value> {
    serde_json::from_str(text)
        .map_err(|e| CraftError::MalformedDescriptor(format!("invalid JSON: {}", e)))
}

/// Serialize a descriptor the way it is written to disk.
pub fn to_pretty_json(descriptor: &Value) -> Result<String> {
    let mut text = serde_json::to_string_pretty(descriptor)
        .map_err(|e| CraftError::MalformedDescriptor(format!("cannot serialize: {}", e)))?;
    text.push('\n');
    Ok(text)
}

/// Add `features[<capability id>] = {}`, creating `features` if needed.
pub fn inject_capability(descriptor: &mut Value, capability: Capability) -> Result<()> {
    let root = descriptor.as_object_mut().ok_or_else(|| {
        CraftError::MalformedDescriptor("top level is not a JSON object".to_string())
    })?;

    let features = root
        .entry("features")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| {
            CraftError::MalformedDescriptor("'features' is not a JSON object".to_string())
        })?;

    features.insert(
        capability.feature_id().to_string(),
        Value::Object(Map::new()),
    );
    Ok(())
}

/// Container name passed to the runtime through `runArgs`.
///
/// Accepts both `"--name", "<value>"` and `"--name=<value>"`.
pub fn container_name(descriptor: &Value) -> Result<String> {
    let run_args = descriptor
        .get("runArgs")
        .ok_or_else(|| CraftError::MalformedDescriptor("missing 'runArgs'".to_string()))?
        .as_array()
        .ok_or_else(|| CraftError::MalformedDescriptor("'runArgs' is not a list".to_string()))?;

    let args = run_args
        .iter()
        .map(|v| {
            v.as_str().ok_or_else(|| {
                CraftError::MalformedDescriptor(format!("'runArgs' entry {} is not a string", v))
            })
        })
        .collect::<Result<Vec<&str>>>()?;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let name = if *arg == "--name" {
            iter.next().copied()
        } else {
            arg.strip_prefix("--name=")
        };

        if let Some(name) = name {
            if name.is_empty() {
                break;
            }
            return Ok(name.to_string());
        }
    }

    Err(CraftError::MalformedDescriptor(
        "'runArgs' does not set a container name (--name)".to_string(),
    ))
}

/// `value` encoded as a JSON string, without the surrounding quotes.
fn json_string_body(value: &str) -> String {
    let quoted = Value::String(value.to_string()).to_string();
    quoted[1..quoted.len() - 1].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateStore;
    use crate::template::store::DESCRIPTOR_TEMPLATE;
    use serde_json::json;

    fn params(name: &str, ports: Vec<u16>) -> DescriptorParams {
        DescriptorParams {
            name: name.to_string(),
            ports,
            runtime_version: "3.11".to_string(),
            workspace: "ws".to_string(),
        }
    }

    fn render_embedded(params: &DescriptorParams) -> Value {
        let template = TemplateStore::Embedded
            .read_to_string(DESCRIPTOR_TEMPLATE)
            .unwrap();
        parse_descriptor(&render_descriptor(&template, params).unwrap()).unwrap()
    }

    #[test]
    fn rendered_descriptor_round_trips_inputs() {
        let p = DescriptorParams {
            name: "demo".to_string(),
            ports: vec![8080, 3000],
            runtime_version: "3.12".to_string(),
            workspace: "my-project".to_string(),
        };
        let d = render_embedded(&p);

        assert_eq!(d["name"], "demo");
        assert_eq!(d["forwardPorts"], json!([8080, 3000]));
        assert_eq!(d["build"]["args"]["PY_VER"], "3.12");
        assert_eq!(d["containerEnv"]["WORKSPACE_NAME"], "my-project");
        assert_eq!(container_name(&d).unwrap(), "my-project_devcontainer");
    }

    #[test]
    fn names_needing_escapes_round_trip() {
        for name in ["say \"hi\"", "back\\slash", "tab\there", "ünïcödé ✓"] {
            let d = render_embedded(&params(name, vec![]));
            assert_eq!(d["name"], name);
        }
    }

    #[test]
    fn empty_ports_render_as_empty_list() {
        let d = render_embedded(&params("demo", vec![]));
        assert_eq!(d["forwardPorts"], json!([]));
    }

    #[test]
    fn render_rejects_template_missing_a_token() {
        let err = render_descriptor("{\"name\": \"{{NAME}}\"}", &params("demo", vec![])).unwrap_err();
        assert!(matches!(err, CraftError::Template(_)));
    }

    #[test]
    fn capability_choice_mapping() {
        assert_eq!(Capability::from_choice("1"), Capability::DockerInDocker);
        assert_eq!(Capability::from_choice("2"), Capability::DockerOutsideOfDocker);
        assert_eq!(Capability::from_choice(" 2 "), Capability::DockerOutsideOfDocker);
        assert_eq!(Capability::from_choice("3"), Capability::DockerInDocker);
        assert_eq!(Capability::from_choice("abc"), Capability::DockerInDocker);
        assert_eq!(Capability::from_choice(""), Capability::DockerInDocker);
    }

    #[test]
    fn inject_creates_features_block() {
        let mut d = json!({"name": "demo"});
        inject_capability(&mut d, Capability::DockerOutsideOfDocker).unwrap();

        assert_eq!(d["features"][DOCKER_OUTSIDE_OF_DOCKER_FEATURE], json!({}));
        assert!(d["features"].get(DOCKER_IN_DOCKER_FEATURE).is_none());
    }

    #[test]
    fn inject_keeps_existing_features() {
        let mut d = json!({"features": {"ghcr.io/devcontainers/features/node:1": {"version": "20"}}});
        inject_capability(&mut d, Capability::DockerInDocker).unwrap();

        let features = d["features"].as_object().unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[DOCKER_IN_DOCKER_FEATURE], json!({}));
    }

    #[test]
    fn inject_rejects_non_object_features() {
        let mut d = json!({"features": []});
        let err = inject_capability(&mut d, Capability::DockerInDocker).unwrap_err();
        assert!(matches!(err, CraftError::MalformedDescriptor(_)));
    }

    #[test]
    fn pretty_json_keeps_key_order() {
        let d = render_embedded(&params("demo", vec![]));
        let text = to_pretty_json(&d).unwrap();
        let name_pos = text.find("\"name\"").unwrap();
        let build_pos = text.find("\"build\"").unwrap();
        assert!(name_pos < build_pos);
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn container_name_accepts_equals_form() {
        let d = json!({"runArgs": ["--init", "--name=box"]});
        assert_eq!(container_name(&d).unwrap(), "box");
    }

    #[test]
    fn container_name_not_tied_to_position() {
        let d = json!({"runArgs": ["--cap-add=SYS_PTRACE", "--name", "box", "--rm"]});
        assert_eq!(container_name(&d).unwrap(), "box");
    }

    #[test]
    fn container_name_missing_run_args() {
        let err = container_name(&json!({"name": "demo"})).unwrap_err();
        assert!(matches!(err, CraftError::MalformedDescriptor(_)));
        assert!(err.to_string().contains("runArgs"));
    }

    #[test]
    fn container_name_without_name_flag() {
        let err = container_name(&json!({"runArgs": ["--init"]})).unwrap_err();
        assert!(err.to_string().contains("--name"));
    }

    #[test]
    fn container_name_dangling_flag() {
        let err = container_name(&json!({"runArgs": ["--name"]})).unwrap_err();
        assert!(matches!(err, CraftError::MalformedDescriptor(_)));
    }

    #[test]
    fn container_name_non_string_entry() {
        let err = container_name(&json!({"runArgs": ["--name", 5]})).unwrap_err();
        assert!(matches!(err, CraftError::MalformedDescriptor(_)));
    }

    #[test]
    fn parse_rejects_invalid_json() {
        let err = parse_descriptor("{ not json").unwrap_err();
        assert!(matches!(err, CraftError::MalformedDescriptor(_)));
    }
}
