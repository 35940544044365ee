use std::{fmt, path::PathBuf};

use xmltree::{Element, EmitterConfig, XMLNode};

use crate::{error::SweepError, sweep::SweepValue, sweep_config::PathRewrite};

/// Why a source file did not produce any scenes.
/// None of these are errors, the file simply is not a usable template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotATemplateName,
    Malformed(String),
    MissingNode(&'static str),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotATemplateName => write!(f, "file name has no parameter"),
            SkipReason::Malformed(message) => write!(f, "malformed XML: {}", message),
            SkipReason::MissingNode(name) => write!(f, "no <{}> node", name),
        }
    }
}

/// A parsed template with the texture paths already fixed up.
/// Every sweep value starts from a fresh copy of `root`.
#[derive(Debug, Clone)]
pub struct SceneTemplate {
    pub path: PathBuf,
    pub parameter: String,
    root: Element,
}

impl SceneTemplate {
    /// Expects `<root><scene><instance><bsdf>`, anything else is skipped.
    pub fn parse(
        path: PathBuf,
        parameter: String,
        source: &[u8],
        path_rewrite: &PathRewrite,
    ) -> Result<Self, SkipReason> {
        let mut root = Element::parse(source).map_err(|e| SkipReason::Malformed(e.to_string()))?;
        strip_comments(&mut root);

        let scene = root
            .get_mut_child("scene")
            .ok_or(SkipReason::MissingNode("scene"))?;
        scene
            .get_child("instance")
            .ok_or(SkipReason::MissingNode("instance"))?
            .get_child("bsdf")
            .ok_or(SkipReason::MissingNode("bsdf"))?;

        let rewritten = rewrite_envmap_textures(scene, path_rewrite);
        if rewritten > 0 {
            log::debug!("Rewrote {} envmap texture path(s) in {:?}", rewritten, path);
        }

        Ok(Self {
            path,
            parameter,
            root,
        })
    }

    /// The scene for one sweep value, with the output image renamed to `id`.
    pub fn variant(&self, id: &str, value: &SweepValue) -> Result<Element, SweepError> {
        let mut root = self.root.clone();

        if let Some(image) = root.get_mut_child("image") {
            image.attributes.insert("id".to_string(), id.to_string());
        }

        let parameter = &self.parameter;
        let target = root
            .get_mut_child("scene")
            .and_then(|scene| scene.get_mut_child("instance"))
            .and_then(|instance| instance.get_mut_child("bsdf"))
            .and_then(|bsdf| {
                child_elements_mut(bsdf).find(|element| {
                    element.name == "float"
                        && attribute(element, "name") == Some(parameter.as_str())
                })
            })
            .ok_or_else(|| SweepError::ParameterNotFound {
                template: self.path.clone(),
                parameter: parameter.clone(),
            })?;
        target
            .attributes
            .insert("value".to_string(), value.formatted.clone());

        Ok(root)
    }
}

/// Indented XML without the declaration and without blank lines.
/// Lines are joined with `\n`, there is no trailing newline.
pub fn render_scene(root: &Element, id: &str) -> Result<String, SweepError> {
    let serialize_error = |message: String| SweepError::Serialize {
        id: id.to_string(),
        message,
    };

    let mut buffer = Vec::new();
    root.write_with_config(
        &mut buffer,
        EmitterConfig::new()
            .write_document_declaration(false)
            .perform_indent(true)
            .pad_self_closing(false)
            .indent_string("    "),
    )
    .map_err(|e| serialize_error(e.to_string()))?;
    let text = String::from_utf8(buffer).map_err(|e| serialize_error(e.to_string()))?;

    let lines: Vec<_> = text
        .lines()
        .filter(|line| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with("<?xml")
        })
        .collect();
    Ok(lines.join("\n"))
}

/// Only `<light type="envmap">` with an image texture is touched,
/// and only on an exact match of the old path.
fn rewrite_envmap_textures(scene: &mut Element, path_rewrite: &PathRewrite) -> usize {
    let mut rewritten = 0;
    for light in child_elements_mut(scene)
        .filter(|element| element.name == "light" && attribute(element, "type") == Some("envmap"))
    {
        let Some(texture) = light.get_mut_child("texture") else {
            continue;
        };
        if attribute(texture, "type") != Some("image") {
            continue;
        }
        if attribute(texture, "filename") == Some(path_rewrite.from.as_str()) {
            texture
                .attributes
                .insert("filename".to_string(), path_rewrite.to.clone());
            rewritten += 1;
        }
    }
    rewritten
}

fn strip_comments(element: &mut Element) {
    element.children.retain(|node| {
        !matches!(
            node,
            XMLNode::Comment(_) | XMLNode::ProcessingInstruction(_, _)
        )
    });
    for child in child_elements_mut(element) {
        strip_comments(child);
    }
}

fn child_elements_mut(element: &mut Element) -> impl Iterator<Item = &mut Element> {
    element.children.iter_mut().filter_map(|node| match node {
        XMLNode::Element(child) => Some(child),
        _ => None,
    })
}

fn attribute<'a>(element: &'a Element, name: &str) -> Option<&'a str> {
    element.attributes.get(name).map(String::as_str)
}
