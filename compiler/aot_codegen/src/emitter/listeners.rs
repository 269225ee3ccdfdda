//! Event-listener metadata.
//!
//! Every unit that can reference a listener's bean type gets a
//! `getEventListenersMetadata()` method listing its listeners; the root
//! registers a single `EventListenerRegistrar` bean fed with that list, or
//! with the concatenation of every host's list when listeners are spread
//! across units.

use aot_ir::{ExecId, Idx};
use tracing::debug;

use super::BootstrapEmitter;
use crate::code::CodeBlock;
use crate::formatter::{string_literal, CONTEXT};
use crate::reflect::{Member, ReflectionFlags};

/// Name the registrar bean is registered under.
pub const REGISTRAR_BEAN_NAME: &str = "org.springframework.aot.EventListenerRegistrar";

const METADATA_METHOD: &str = "getEventListenersMetadata";
const ALL_METADATA_METHOD: &str = "getAllEventListenersMetadata";

/// An annotated listener method on a registered component.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EventListenerRequest {
    pub bean_name: String,
    pub bean_type: Idx,
    pub method: ExecId,
    /// Listener factory to use instead of the default one.
    pub factory_bean_name: Option<String>,
}

impl EventListenerRequest {
    pub fn new(bean_name: impl Into<String>, bean_type: Idx, method: ExecId) -> Self {
        Self {
            bean_name: bean_name.into(),
            bean_type,
            method,
            factory_bean_name: None,
        }
    }

    #[must_use]
    pub fn with_factory_bean_name(mut self, name: impl Into<String>) -> Self {
        self.factory_bean_name = Some(name.into());
        self
    }
}

impl BootstrapEmitter<'_> {
    /// Emit metadata methods for `listeners` and the registrar bean.
    /// Nothing is written when there are no listeners.
    #[tracing::instrument(level = "debug", skip_all, fields(listeners = listeners.len()))]
    pub fn emit_event_listeners(&mut self, listeners: &[EventListenerRequest]) {
        if listeners.is_empty() {
            return;
        }

        let mut hosts: Vec<(String, Vec<CodeBlock>)> = Vec::new();
        for listener in listeners {
            let host = self.listener_host(listener);
            let entry = self.listener_metadata(listener);
            match hosts.iter_mut().find(|(namespace, _)| *namespace == host) {
                Some((_, entries)) => entries.push(entry),
                None => hosts.push((host, vec![entry])),
            }
            self.facts.record(
                self.pool.raw_class(listener.bean_type),
                [Member::Method(listener.method)],
                ReflectionFlags::INVOKE_DECLARED_METHODS,
            );
        }

        let mut sources = Vec::with_capacity(hosts.len());
        for (namespace, entries) in hosts {
            debug!(unit = %namespace, count = entries.len(), "listener metadata");
            let method = self.units.unit_mut(&namespace).add_method(
                METADATA_METHOD,
                Some(metadata_list_type()),
                CodeBlock::new(),
                vec![list_of(&entries)],
            );
            sources.push(self.metadata_call(&namespace, &method));
        }

        let metadata = match <[CodeBlock; 1]>::try_from(sources) {
            Ok([single]) => single,
            Err(sources) => {
                let root_namespace = self.root_namespace.clone();
                let method = self.units.root_mut().add_method(
                    ALL_METADATA_METHOD,
                    Some(metadata_list_type()),
                    CodeBlock::new(),
                    aggregate(&sources),
                );
                self.metadata_call(&root_namespace, &method)
            }
        };

        let mut registrar = CodeBlock::of(&format!(
            "{CONTEXT}.registerBean({}, ",
            string_literal(REGISTRAR_BEAN_NAME)
        ));
        registrar
            .push_type(Idx::LISTENER_REGISTRAR)
            .push_str(".class, () -> new ")
            .push_type(Idx::LISTENER_REGISTRAR)
            .push_str(&format!("({CONTEXT}, "))
            .push_code(&metadata)
            .push_str("));");
        self.units.root_mut().add_statement(registrar);
    }

    /// Namespace of the unit listing `listener`.
    fn listener_host(&self, listener: &EventListenerRequest) -> String {
        let mut chain = Vec::new();
        self.require_type(listener.bean_type, &mut chain);
        if let Some(executable) = self.pool.executable(listener.method) {
            for &param in &executable.params {
                self.require_type(param, &mut chain);
            }
        }
        chain
            .pop()
            .unwrap_or_else(|| self.root_namespace.clone())
    }

    /// `EventListenerMetadata.forBean("name", T.class).annotatedMethod("m", E.class)`
    fn listener_metadata(&self, listener: &EventListenerRequest) -> CodeBlock {
        let f = self.formatter;
        let mut code = CodeBlock::of_type(Idx::LISTENER_METADATA);
        code.push_str(".forBean(")
            .push_str(&string_literal(&listener.bean_name))
            .push_str(", ")
            .push_code(&f.class_literal(listener.bean_type))
            .push_str(")");
        if let Some(factory) = &listener.factory_bean_name {
            code.push_str(".eventListenerFactoryBeanName(")
                .push_str(&string_literal(factory))
                .push_str(")");
        }
        let name = self
            .pool
            .executable(listener.method)
            .and_then(|e| e.name())
            .unwrap_or_default();
        code.push_str(".annotatedMethod(").push_str(&string_literal(name));
        let params = f.format_parameter_types(listener.method);
        if !params.is_empty() {
            code.push_str(", ").push_code(&params);
        }
        code.push_str(")");
        code
    }

    /// `Unit.getEventListenersMetadata()`
    fn metadata_call(&self, namespace: &str, method: &str) -> CodeBlock {
        let mut code = CodeBlock::new();
        code.push_unit(namespace, &self.units.root_key().name)
            .push_str(".")
            .push_str(method)
            .push_str("()");
        code
    }
}

/// `List<EventListenerMetadata>`
fn metadata_list_type() -> CodeBlock {
    let mut code = CodeBlock::of_type(Idx::LIST);
    code.push_str("<").push_type(Idx::LISTENER_METADATA).push_str(">");
    code
}

/// `return List.of(..);` with one entry per line.
fn list_of(entries: &[CodeBlock]) -> CodeBlock {
    let mut code = CodeBlock::of("return ");
    code.push_type(Idx::LIST)
        .push_str(".of(\n  ")
        .push_code(&CodeBlock::join(entries.iter().cloned(), ",\n  "))
        .push_str("\n);");
    code
}

/// Body concatenating the lists returned by `sources`.
fn aggregate(sources: &[CodeBlock]) -> Vec<CodeBlock> {
    let mut declaration = metadata_list_type();
    declaration
        .push_str(" metadata = new ")
        .push_type(Idx::ARRAY_LIST)
        .push_str("<>();");
    let mut body = vec![declaration];
    for source in sources {
        let mut add = CodeBlock::of("metadata.addAll(");
        add.push_code(source).push_str(");");
        body.push(add);
    }
    body.push(CodeBlock::of("return metadata;"));
    body
}
