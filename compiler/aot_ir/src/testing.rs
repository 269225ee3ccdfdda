//! Sample type universe shared by tests across the compiler crates.
//!
//! Mirrors the kinds of application types a container typically holds:
//! overloaded constructors, configuration classes with factory methods,
//! factory objects, package-private declarations, listeners and generics.

use crate::{DeclaredType, ExecId, ExecutableDef, FieldDef, Idx, Pool, Visibility};

/// Public sample namespace.
pub const SAMPLES: &str = "com.example.samples";

/// Namespace holding package-private samples.
pub const HIDDEN: &str = "com.example.samples.visibility";

/// Namespace of the generated root unit in tests.
pub const ROOT: &str = "com.example";

/// Pool populated with the sample types, plus handles to each of them.
#[derive(Clone, Debug)]
pub struct Samples {
    pub pool: Pool,

    /// `NumberHolder(String)` and `NumberHolder(Integer)`.
    pub number_holder: Idx,
    pub number_holder_string: ExecId,
    pub number_holder_integer: ExecId,

    /// `java.util.Locale`, compatible with no `NumberHolder` constructor.
    pub locale: Idx,

    /// `Holder<T>`.
    pub holder: Idx,
    pub holder_of_string: Idx,
    pub holder_of_integer: Idx,

    /// Factory object producing `Holder<String>`.
    pub string_holder_factory: Idx,

    /// Public configuration with an instance `stringBean()` and a static
    /// `integerBean()` factory method.
    pub simple_config: Idx,
    pub simple_config_ctor: ExecId,
    pub string_bean: ExecId,
    pub integer_bean: ExecId,

    /// Package-private configuration in [`HIDDEN`] with a static
    /// `anotherStringBean()`.
    pub protected_config: Idx,
    pub another_string_bean: ExecId,

    /// Public outer type in [`HIDDEN`] enclosing a package-private
    /// `ProtectedInner` with a no-arg constructor.
    pub outer: Idx,
    pub protected_inner: Idx,

    /// `Overloaded(Object)` and `Overloaded(Number)`.
    pub overloaded: Idx,

    /// `Joiner(String)` and `Joiner(String...)`.
    pub joiner: Idx,
    pub joiner_single: ExecId,
    pub joiner_varargs: ExecId,

    /// `Tags(String[])`.
    pub tags: Idx,

    /// `Repository<T>` with a no-arg constructor.
    pub repository: Idx,
    pub repository_of_string: Idx,

    /// Public `DataSource` and `Client(DataSource)`.
    pub data_source: Idx,
    pub client: Idx,
    pub client_ctor: ExecId,

    /// `Timeout(long, ChronoUnit)`.
    pub timeout: Idx,
    pub chrono_unit: Idx,

    /// Bean with a `setName(String)` setter and a `counter` field.
    pub property_sample: Idx,
    pub set_name: ExecId,

    /// `SingleEventListener.onStartup(ApplicationStartedEvent)`.
    pub listener: Idx,
    pub on_startup: ExecId,
    pub started_event: Idx,

    /// Package-private listener in [`HIDDEN`].
    pub hidden_listener: Idx,
    pub on_hidden_event: ExecId,
}

impl Samples {
    #[allow(clippy::too_many_lines)]
    pub fn new() -> Self {
        let mut pool = Pool::new();

        let number_holder = pool.declare(DeclaredType::class(SAMPLES, "NumberHolder"));
        let number_holder_string =
            pool.add_executable(number_holder, ExecutableDef::constructor(&[Idx::STRING]));
        let number_holder_integer =
            pool.add_executable(number_holder, ExecutableDef::constructor(&[Idx::BOXED_INT]));

        let locale = pool.declare(DeclaredType::class("java.util", "Locale"));

        let holder = pool.declare(DeclaredType::class(SAMPLES, "Holder"));
        let t = pool.type_var("T", None);
        pool.add_executable(holder, ExecutableDef::constructor(&[t]));
        let holder_of_string = pool.parameterized(holder, &[Idx::STRING]);
        let holder_of_integer = pool.parameterized(holder, &[Idx::BOXED_INT]);

        let string_holder_factory = pool.declare(
            DeclaredType::class(SAMPLES, "StringHolderFactory").producing(holder_of_string),
        );
        pool.add_executable(string_holder_factory, ExecutableDef::constructor(&[]));

        let simple_config = pool.declare(DeclaredType::class(SAMPLES, "SimpleConfiguration"));
        let simple_config_ctor =
            pool.add_executable(simple_config, ExecutableDef::constructor(&[]));
        let string_bean = pool.add_executable(
            simple_config,
            ExecutableDef::method("stringBean", Idx::STRING, &[]),
        );
        let integer_bean = pool.add_executable(
            simple_config,
            ExecutableDef::static_method("integerBean", Idx::BOXED_INT, &[]),
        );

        let protected_config = pool.declare(
            DeclaredType::class(HIDDEN, "ProtectedConfiguration")
                .with_visibility(Visibility::Package),
        );
        pool.add_executable(protected_config, ExecutableDef::constructor(&[]));
        let another_string_bean = pool.add_executable(
            protected_config,
            ExecutableDef::static_method("anotherStringBean", Idx::STRING, &[]),
        );

        let outer = pool.declare(DeclaredType::class(HIDDEN, "Outer"));
        let protected_inner = pool.declare(
            DeclaredType::class(HIDDEN, "ProtectedInner")
                .enclosed_in(outer)
                .with_visibility(Visibility::Package),
        );
        pool.add_executable(protected_inner, ExecutableDef::constructor(&[]));

        let overloaded = pool.declare(DeclaredType::class(SAMPLES, "Overloaded"));
        pool.add_executable(overloaded, ExecutableDef::constructor(&[Idx::OBJECT]));
        pool.add_executable(overloaded, ExecutableDef::constructor(&[Idx::NUMBER]));

        let string_array = pool.array(Idx::STRING);
        let joiner = pool.declare(DeclaredType::class(SAMPLES, "Joiner"));
        let joiner_single = pool.add_executable(joiner, ExecutableDef::constructor(&[Idx::STRING]));
        let joiner_varargs = pool.add_executable(
            joiner,
            ExecutableDef::constructor(&[string_array]).varargs(),
        );

        let tags = pool.declare(DeclaredType::class(SAMPLES, "Tags"));
        pool.add_executable(tags, ExecutableDef::constructor(&[string_array]));

        let repository = pool.declare(DeclaredType::class(SAMPLES, "Repository"));
        pool.add_executable(repository, ExecutableDef::constructor(&[]));
        let repository_of_string = pool.parameterized(repository, &[Idx::STRING]);

        let data_source = pool.declare(DeclaredType::interface(SAMPLES, "DataSource"));
        let client = pool.declare(DeclaredType::class(SAMPLES, "Client"));
        let client_ctor = pool.add_executable(client, ExecutableDef::constructor(&[data_source]));

        let chrono_unit = pool.declare(DeclaredType::enumeration(
            "java.time.temporal",
            "ChronoUnit",
            &["SECONDS", "MINUTES", "DAYS"],
        ));
        let timeout = pool.declare(DeclaredType::class(SAMPLES, "Timeout"));
        pool.add_executable(
            timeout,
            ExecutableDef::constructor(&[Idx::LONG, chrono_unit]),
        );

        let property_sample = pool.declare(DeclaredType::class(SAMPLES, "PropertySample"));
        pool.add_executable(property_sample, ExecutableDef::constructor(&[]));
        let set_name = pool.add_executable(
            property_sample,
            ExecutableDef::method("setName", Idx::VOID, &[Idx::STRING]),
        );
        pool.add_field(property_sample, FieldDef::new("counter", Idx::INT));

        let started_event = pool.declare(DeclaredType::class(
            "org.springframework.boot.context.event",
            "ApplicationStartedEvent",
        ));
        let listener = pool.declare(DeclaredType::class(SAMPLES, "SingleEventListener"));
        pool.add_executable(listener, ExecutableDef::constructor(&[]));
        let on_startup = pool.add_executable(
            listener,
            ExecutableDef::method("onStartup", Idx::VOID, &[started_event]),
        );

        let hidden_listener = pool.declare(
            DeclaredType::class(HIDDEN, "ProtectedEventListener")
                .with_visibility(Visibility::Package),
        );
        pool.add_executable(hidden_listener, ExecutableDef::constructor(&[]));
        let on_hidden_event = pool.add_executable(
            hidden_listener,
            ExecutableDef::method("onEvent", Idx::VOID, &[started_event]),
        );

        Self {
            pool,
            number_holder,
            number_holder_string,
            number_holder_integer,
            locale,
            holder,
            holder_of_string,
            holder_of_integer,
            string_holder_factory,
            simple_config,
            simple_config_ctor,
            string_bean,
            integer_bean,
            protected_config,
            another_string_bean,
            outer,
            protected_inner,
            overloaded,
            joiner,
            joiner_single,
            joiner_varargs,
            tags,
            repository,
            repository_of_string,
            data_source,
            client,
            client_ctor,
            timeout,
            chrono_unit,
            property_sample,
            set_name,
            listener,
            on_startup,
            started_event,
            hidden_listener,
            on_hidden_event,
        }
    }
}

impl Default for Samples {
    fn default() -> Self {
        Self::new()
    }
}
