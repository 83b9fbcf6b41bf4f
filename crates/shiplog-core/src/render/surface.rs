use crate::value::Value;
use shiplog_schema::{
    node::SectionKind,
    path::KeyPath,
    types::{GenId, InputKind},
};

///
/// Input
///
/// One rendered interactive input and its current value. The surface owns
/// the mapping between inputs and key-paths; the serializer walks it.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Input {
    pub path: KeyPath,
    pub label: String,
    pub kind: InputKind,
    value: Value,
}

impl Input {
    #[must_use]
    pub fn new(path: KeyPath, label: impl Into<String>, kind: InputKind) -> Self {
        let value = if kind.is_boolean() {
            Value::Bool(false)
        } else {
            Value::Text(String::new())
        };
        Self {
            path,
            label: label.into(),
            kind,
            value,
        }
    }

    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    pub fn set_value(&mut self, value: Value) {
        self.value = value;
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.value.is_blank()
    }
}

///
/// Block
///
/// A titled run of inputs inside a section (one field group, one table
/// group, or one matrix column). A block carrying a `gen_id` exists only
/// while that generator is active.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub title: Option<String>,
    pub gen_id: Option<GenId>,
    pub inputs: Vec<Input>,
}

impl Block {
    #[must_use]
    pub fn untitled(inputs: Vec<Input>) -> Self {
        Self {
            title: None,
            gen_id: None,
            inputs,
        }
    }

    #[must_use]
    pub fn titled(title: impl Into<String>, inputs: Vec<Input>) -> Self {
        Self {
            title: Some(title.into()),
            gen_id: None,
            inputs,
        }
    }

    #[must_use]
    pub fn gen_tagged(mut self, id: Option<GenId>) -> Self {
        self.gen_id = id;
        self
    }
}

///
/// ControlView
///
/// Rendered state of a generator-control section: the universe of toggles,
/// the target-count selector position, and which toggles are down. Wired to
/// the state machine through the form controller, not directly.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ControlView {
    pub ids: Vec<GenId>,
    pub target: usize,
    pub active: Vec<GenId>,
}

///
/// RenderedSection
///

#[derive(Clone, Debug, PartialEq)]
pub struct RenderedSection {
    pub id: Option<String>,
    pub title: String,
    pub kind: SectionKind,
    pub blocks: Vec<Block>,
    pub control: Option<ControlView>,
    /// Prompt shown by an empty gen-matrix instead of inputs.
    pub placeholder: Option<String>,
    /// Composite children, rendered per their own contracts.
    pub children: Vec<RenderedSection>,
}

impl RenderedSection {
    pub(crate) fn for_each_input<'a>(&'a self, f: &mut impl FnMut(&'a Input)) {
        for block in &self.blocks {
            for input in &block.inputs {
                f(input);
            }
        }
        for child in &self.children {
            child.for_each_input(f);
        }
    }

    pub(crate) fn for_each_input_mut<'a>(&'a mut self, f: &mut impl FnMut(&'a mut Input)) {
        for block in &mut self.blocks {
            for input in &mut block.inputs {
                f(input);
            }
        }
        for child in &mut self.children {
            child.for_each_input_mut(f);
        }
    }
}

///
/// Surface
///
/// The live input tree produced by the renderer. Lookup is a linear walk;
/// the shipped document renders a few hundred inputs at most.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Surface {
    pub sections: Vec<RenderedSection>,
}

impl Surface {
    /// Every rendered input, in document order.
    #[must_use]
    pub fn inputs(&self) -> Vec<&Input> {
        let mut out = Vec::new();
        for section in &self.sections {
            section.for_each_input(&mut |input| out.push(input));
        }
        out
    }

    #[must_use]
    pub fn inputs_mut(&mut self) -> Vec<&mut Input> {
        let mut out = Vec::new();
        for section in &mut self.sections {
            section.for_each_input_mut(&mut |input| out.push(input));
        }
        out
    }

    #[must_use]
    pub fn input(&self, path: &KeyPath) -> Option<&Input> {
        self.inputs().into_iter().find(|i| &i.path == path)
    }

    #[must_use]
    pub fn input_mut(&mut self, path: &KeyPath) -> Option<&mut Input> {
        self.inputs_mut().into_iter().find(|i| &i.path == path)
    }

    /// Set the value of the input at `path`; false when no such input is
    /// currently rendered.
    pub fn set_value(&mut self, path: &KeyPath, value: Value) -> bool {
        match self.input_mut(path) {
            Some(input) => {
                input.set_value(value);
                true
            }
            None => false,
        }
    }

    /// Section lookup by id, descending into composite children.
    #[must_use]
    pub fn section(&self, id: &str) -> Option<&RenderedSection> {
        fn find<'a>(sections: &'a [RenderedSection], id: &str) -> Option<&'a RenderedSection> {
            for section in sections {
                if section.id.as_deref() == Some(id) {
                    return Some(section);
                }
                if let Some(found) = find(&section.children, id) {
                    return Some(found);
                }
            }
            None
        }

        find(&self.sections, id)
    }
}
