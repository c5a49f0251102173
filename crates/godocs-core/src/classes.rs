//! Class documentation records
//!
//! Records mirror the documentation extracted from Godot class reference
//! files. Every `description` field holds raw markup until translated.

use std::collections::BTreeMap;

use bbcode_parser::{Interpreter, SyntaxTranslator};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::translate::{Pipeline, Result, TranslateError};

/// A property, or an argument of a method or signal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Property {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub default: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Method {
    pub name: String,
    /// Return type
    #[serde(rename = "type")]
    pub type_name: String,
    pub args: Vec<Property>,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Signal {
    pub name: String,
    pub args: Vec<Property>,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constant {
    pub name: String,
    pub value: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Enum {
    pub name: String,
    pub values: Vec<Constant>,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeItem {
    pub name: String,
    /// Theme data category (`color`, `constant`, `font`, ...)
    pub data_type: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub default: String,
    pub description: String,
}

/// Documentation of a single class
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassDoc {
    pub name: String,
    /// Ancestor class names, nearest first
    pub inheritage: Vec<String>,
    pub brief_description: String,
    pub description: String,
    pub properties: Vec<Property>,
    pub methods: Vec<Method>,
    pub signals: Vec<Signal>,
    pub constants: Vec<Constant>,
    pub enums: Vec<Enum>,
    pub theme_items: Vec<ThemeItem>,
}

impl ClassDoc {
    /// Rewrite every description of this class with `f`
    ///
    /// Stops at the first error.
    pub fn try_map_descriptions<E>(
        &self,
        mut f: impl FnMut(&str) -> std::result::Result<String, E>,
    ) -> std::result::Result<Self, E> {
        let mut class = self.clone();

        class.brief_description = f(&class.brief_description)?;
        class.description = f(&class.description)?;

        for property in &mut class.properties {
            property.description = f(&property.description)?;
        }
        for method in &mut class.methods {
            method.description = f(&method.description)?;
            for arg in &mut method.args {
                arg.description = f(&arg.description)?;
            }
        }
        for signal in &mut class.signals {
            signal.description = f(&signal.description)?;
            for arg in &mut signal.args {
                arg.description = f(&arg.description)?;
            }
        }
        for constant in &mut class.constants {
            constant.description = f(&constant.description)?;
        }
        for item in &mut class.enums {
            item.description = f(&item.description)?;
            for value in &mut item.values {
                value.description = f(&value.description)?;
            }
        }
        for item in &mut class.theme_items {
            item.description = f(&item.description)?;
        }

        Ok(class)
    }
}

/// Documentation context: every class plus free-form options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocContext {
    pub options: BTreeMap<String, serde_json::Value>,
    pub classes: Vec<ClassDoc>,
}

impl DocContext {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Find a class by name
    pub fn get_class(&self, name: &str) -> Option<&ClassDoc> {
        self.classes.iter().find(|class| class.name == name)
    }
}

/// Translate every description of a class
///
/// Names, types and default values are left untouched.
pub fn translate_class<I, T>(class: &ClassDoc, pipeline: &Pipeline<I, T>) -> Result<ClassDoc>
where
    I: Interpreter,
    T: SyntaxTranslator,
{
    class
        .try_map_descriptions(|text| pipeline.translate(text))
        .map_err(|e| TranslateError::Class {
            class: class.name.clone(),
            source: Box::new(e),
        })
}

/// Translate all classes of a context in parallel
///
/// Classes keep their order. A failing class aborts the batch.
pub fn translate_context<I, T>(context: &DocContext, pipeline: &Pipeline<I, T>) -> Result<DocContext>
where
    I: Interpreter + Sync,
    T: SyntaxTranslator + Sync,
{
    let classes = context
        .classes
        .par_iter()
        .map(|class| {
            tracing::debug!(class = %class.name, "translating class");
            translate_class(class, pipeline)
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::info!(classes = classes.len(), "translated documentation context");

    Ok(DocContext {
        options: context.options.clone(),
        classes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::{PipelineOptions, Syntax};
    use bbcode_parser::InterpreterOptions;

    fn pipeline(syntax: Syntax, strict: bool) -> Pipeline {
        Pipeline::for_syntax(
            syntax,
            InterpreterOptions::default(),
            PipelineOptions { strict },
        )
    }

    fn sample_class() -> ClassDoc {
        ClassDoc {
            name: "Sprite".to_string(),
            inheritage: vec!["Node2D".to_string(), "Node".to_string()],
            brief_description: "A [b]2D[/b] sprite.".to_string(),
            description: "Draws a [Texture2D].".to_string(),
            properties: vec![Property {
                name: "centered".to_string(),
                type_name: "bool".to_string(),
                default: "true".to_string(),
                description: "If [code]true[/code], centered.".to_string(),
            }],
            methods: vec![Method {
                name: "flip".to_string(),
                type_name: "void".to_string(),
                args: vec![Property {
                    name: "axis".to_string(),
                    type_name: "int".to_string(),
                    default: String::new(),
                    description: "[i]Axis[/i] to flip.".to_string(),
                }],
                description: "Flips along [param axis].".to_string(),
            }],
            signals: vec![Signal {
                name: "flipped".to_string(),
                args: vec![],
                description: "Emitted after [method flip].".to_string(),
            }],
            constants: vec![Constant {
                name: "MAX".to_string(),
                value: "8".to_string(),
                description: "[b]Max[/b] frames.".to_string(),
            }],
            enums: vec![Enum {
                name: "Axis".to_string(),
                values: vec![Constant {
                    name: "AXIS_X".to_string(),
                    value: "0".to_string(),
                    description: "The [i]X[/i] axis.".to_string(),
                }],
                description: "Flip axes.".to_string(),
            }],
            theme_items: vec![ThemeItem {
                name: "outline".to_string(),
                data_type: "color".to_string(),
                type_name: "Color".to_string(),
                default: "Color(0, 0, 0, 1)".to_string(),
                description: "[u]Outline[/u] color.".to_string(),
            }],
        }
    }

    // ========================================================================
    // Records
    // ========================================================================

    #[test]
    fn test_deserialize_with_missing_fields() {
        let context = DocContext::from_json(
            r#"{"classes": [{"name": "Node", "methods": [{"name": "free", "type": "void"}]}]}"#,
        )
        .unwrap();

        let class = &context.classes[0];
        assert_eq!(class.name, "Node");
        assert!(class.inheritage.is_empty());
        assert_eq!(class.description, "");
        assert_eq!(class.methods[0].type_name, "void");
        assert!(class.methods[0].args.is_empty());
        assert!(context.options.is_empty());
    }

    #[test]
    fn test_type_field_name() {
        let property = Property {
            name: "speed".to_string(),
            type_name: "float".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&property).unwrap();
        assert_eq!(json["type"], "float");
        assert!(json.get("type_name").is_none());
    }

    #[test]
    fn test_invalid_json() {
        let err = DocContext::from_json("{\"classes\": 3}").unwrap_err();
        assert!(matches!(err, TranslateError::Json(_)));
    }

    #[test]
    fn test_get_class() {
        let context = DocContext {
            classes: vec![sample_class()],
            ..Default::default()
        };
        assert!(context.get_class("Sprite").is_some());
        assert!(context.get_class("Missing").is_none());
    }

    // ========================================================================
    // Translation
    // ========================================================================

    #[test]
    fn test_translate_class_rst() {
        let class = translate_class(&sample_class(), &pipeline(Syntax::Rst, false)).unwrap();

        assert_eq!(class.brief_description, "A **2D** sprite.");
        assert_eq!(class.description, "Draws a :ref:`Texture2D <Texture2D>`.");
        assert_eq!(class.properties[0].description, "If ``true``, centered.");
        assert_eq!(class.methods[0].description, "Flips along ``axis``.");
        assert_eq!(class.methods[0].args[0].description, "*Axis* to flip.");
        assert_eq!(class.signals[0].description, "Emitted after :ref:`flip <flip>`.");
        assert_eq!(class.constants[0].description, "**Max** frames.");
        assert_eq!(class.enums[0].values[0].description, "The *X* axis.");
        assert_eq!(class.theme_items[0].description, "Outline color.");
    }

    #[test]
    fn test_translate_class_keeps_non_markup_fields() {
        let original = sample_class();
        let class = translate_class(&original, &pipeline(Syntax::Markdown, false)).unwrap();

        assert_eq!(class.name, original.name);
        assert_eq!(class.inheritage, original.inheritage);
        assert_eq!(class.properties[0].default, "true");
        assert_eq!(class.theme_items[0].default, "Color(0, 0, 0, 1)");
        assert_eq!(class.methods[0].args[0].type_name, "int");
        assert_eq!(class.enums[0].values[0].value, "0");
    }

    #[test]
    fn test_translate_class_strict_names_class() {
        let mut class = sample_class();
        class.methods[0].description = "[wave]Wobbly[/wave]".to_string();

        let err = translate_class(&class, &pipeline(Syntax::Rst, true)).unwrap_err();
        match &err {
            TranslateError::Class { class, source } => {
                assert_eq!(class, "Sprite");
                assert!(matches!(**source, TranslateError::UnhandledTags { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(
            err.to_string(),
            "Failed to translate class Sprite: Unhandled tags: wave"
        );
    }

    #[test]
    fn test_translate_context_preserves_order() {
        let mut options = BTreeMap::new();
        options.insert("name".to_string(), serde_json::json!("Demo"));

        let classes = (0..32)
            .map(|i| ClassDoc {
                name: format!("Class{}", i),
                description: format!("[b]{}[/b]", i),
                ..Default::default()
            })
            .collect();
        let context = DocContext { options, classes };

        let translated = translate_context(&context, &pipeline(Syntax::Markdown, false)).unwrap();

        assert_eq!(translated.options, context.options);
        assert_eq!(translated.classes.len(), 32);
        for (i, class) in translated.classes.iter().enumerate() {
            assert_eq!(class.name, format!("Class{}", i));
            assert_eq!(class.description, format!("**{}**", i));
        }
    }

    #[test]
    fn test_translate_context_strict_failure() {
        let mut bad = sample_class();
        bad.name = "Broken".to_string();
        bad.description = "[blink]x[/blink]".to_string();

        let context = DocContext {
            classes: vec![sample_class(), bad],
            ..Default::default()
        };

        let err = translate_context(&context, &pipeline(Syntax::Rst, true)).unwrap_err();
        assert!(matches!(err, TranslateError::Class { ref class, .. } if class == "Broken"));
    }

    #[test]
    fn test_context_json_roundtrip() {
        let context = DocContext {
            classes: vec![sample_class()],
            ..Default::default()
        };
        let json = context.to_json_pretty().unwrap();
        assert!(json.contains("\"brief_description\""));
        assert_eq!(DocContext::from_json(&json).unwrap(), context);
    }
}
