//! Domain model rendering.

use crate::ir::{
    ClosedHierarchy, DomainModel, Entity, Enumeration, ImmutableValue, Property, Subtype,
    Visibility,
};
use super::kotlin_types::{escape_identifier, to_kotlin_type, type_parameters, where_clause};
use super::{parameter_block, RenderOptions};

pub(super) fn render_domain_model(model: &DomainModel, options: &RenderOptions) -> String {
    match model {
        DomainModel::ImmutableValue(value) => render_value(value, options),
        DomainModel::Entity(entity) => render_entity(entity, options),
        DomainModel::ClosedHierarchy(hierarchy) => render_hierarchy(hierarchy, options),
        DomainModel::Enumeration(enumeration) => render_enumeration(enumeration, options),
    }
}

/// Single-field wrappers become inline value classes; other field counts
/// fall back to the closest valid declaration.
fn render_value(value: &ImmutableValue, options: &RenderOptions) -> String {
    let name = escape_identifier(&value.name);
    match value.properties.as_slice() {
        [] => format!("class {}\n", name),
        [field] => format!("@JvmInline\nvalue class {}({})\n", name, property(field)),
        fields => format!("data class {}{}\n", name, constructor(fields, options)),
    }
}

fn render_entity(entity: &Entity, options: &RenderOptions) -> String {
    let name = escape_identifier(&entity.name);
    let type_params = type_parameters(&entity.type_parameters);
    let where_ = where_clause(&entity.type_parameters);
    let ctor = entity.constructor();
    let body = entity.body_properties();

    let mut output = String::new();
    if ctor.is_empty() {
        output.push_str(&format!("class {}{}{}", name, type_params, where_));
    } else {
        output.push_str(&format!(
            "data class {}{}{}{}",
            name,
            type_params,
            constructor(ctor, options),
            where_
        ));
    }

    if body.is_empty() {
        output.push('\n');
        return output;
    }

    let indent = &options.indent;
    output.push_str(" {\n");
    let members: Vec<String> = body
        .iter()
        .map(|p| {
            let mut member = format!(
                "{indent}{}\n{indent}{indent}get() = {}\n",
                property(p),
                options.stub_body
            );
            if p.mutable {
                member.push_str(&format!("{indent}{indent}set(value) = {}\n", options.stub_body));
            }
            member
        })
        .collect();
    output.push_str(&members.join("\n"));
    output.push_str("}\n");
    output
}

fn render_hierarchy(hierarchy: &ClosedHierarchy, options: &RenderOptions) -> String {
    let name = escape_identifier(&hierarchy.name);
    let mut output = format!(
        "sealed interface {}{}{}\n",
        name,
        type_parameters(&hierarchy.type_parameters),
        where_clause(&hierarchy.type_parameters)
    );
    for subtype in &hierarchy.subtypes {
        output.push('\n');
        output.push_str(&render_subtype(subtype, &name, options));
    }
    output
}

/// Kotlin objects cannot be generic, so singletons drop their own type
/// parameters and keep only the supertype arguments.
fn render_subtype(subtype: &Subtype, parent: &str, options: &RenderOptions) -> String {
    let name = escape_identifier(&subtype.name);
    let parent = if subtype.supertype_arguments.is_empty() {
        parent.to_string()
    } else {
        let args: Vec<String> = subtype.supertype_arguments.iter().map(to_kotlin_type).collect();
        format!("{}<{}>", parent, args.join(", "))
    };
    if subtype.singleton {
        return format!("data object {} : {}\n", name, parent);
    }

    let type_params = type_parameters(&subtype.type_parameters);
    let where_ = where_clause(&subtype.type_parameters);
    if subtype.properties.is_empty() {
        format!("class {}{} : {}{}\n", name, type_params, parent, where_)
    } else {
        format!(
            "data class {}{}{} : {}{}\n",
            name,
            type_params,
            constructor(&subtype.properties, options),
            parent,
            where_
        )
    }
}

fn render_enumeration(enumeration: &Enumeration, options: &RenderOptions) -> String {
    let name = escape_identifier(&enumeration.name);
    if enumeration.values.is_empty() {
        return format!("enum class {}\n", name);
    }
    let mut output = format!("enum class {} {{\n", name);
    for value in &enumeration.values {
        output.push_str(&format!("{}{},\n", options.indent, escape_identifier(value)));
    }
    output.push_str("}\n");
    output
}

fn constructor(properties: &[Property], options: &RenderOptions) -> String {
    let params: Vec<String> = properties.iter().map(property).collect();
    parameter_block(&params, options)
}

/// `private var name: Type`
fn property(property: &Property) -> String {
    let visibility = match property.visibility {
        Visibility::Public => "",
        Visibility::Protected => "protected ",
        Visibility::Private => "private ",
    };
    let binding = if property.mutable { "var" } else { "val" };
    format!(
        "{}{} {}: {}",
        visibility,
        binding,
        escape_identifier(&property.name),
        to_kotlin_type(&property.typ)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{PrimitiveKind, Type, Variance};

    fn options() -> RenderOptions {
        RenderOptions::default()
    }

    fn string() -> Type {
        Type::Primitive(PrimitiveKind::String)
    }

    #[test]
    fn value_class_keeps_field_name_and_type() {
        let value = ImmutableValue {
            name: "V".to_string(),
            namespace: String::new(),
            properties: vec![Property::new("field", string())],
        };
        assert_eq!(render_value(&value, &options()), "@JvmInline\nvalue class V(val field: String)\n");
    }

    #[test]
    fn degenerate_values_fall_back() {
        let mut value = ImmutableValue {
            name: "V".to_string(),
            namespace: String::new(),
            properties: vec![],
        };
        assert_eq!(render_value(&value, &options()), "class V\n");

        value.properties = vec![Property::new("a", string()), Property::new("b", string())];
        assert_eq!(
            render_value(&value, &options()),
            "data class V(\n    val a: String,\n    val b: String,\n)\n"
        );
    }

    #[test]
    fn entity_with_mutable_and_private_fields() {
        let mut status = Property::new("status", Type::named("Status"));
        status.mutable = true;
        let mut secret = Property::new("secret", string());
        secret.visibility = Visibility::Private;

        let entity = Entity {
            name: "Account".to_string(),
            namespace: String::new(),
            type_parameters: vec![],
            properties: vec![Property::new("id", Type::named("AccountId")), status, secret],
            constructor_parameters: None,
        };
        assert_eq!(
            render_entity(&entity, &options()),
            "data class Account(\n    val id: AccountId,\n    var status: Status,\n    private val secret: String,\n)\n"
        );
    }

    #[test]
    fn entity_body_properties_get_placeholder_getters() {
        let id = Property::new("id", Type::named("OrderId"));
        let entity = Entity {
            name: "Order".to_string(),
            namespace: String::new(),
            type_parameters: vec![Type::type_parameter("A")],
            properties: vec![id.clone(), Property::new("total", Type::named("Money"))],
            constructor_parameters: Some(vec![id]),
        };
        assert_eq!(
            render_entity(&entity, &options()),
            "data class Order<A>(\n    val id: OrderId,\n) {\n    val total: Money\n        get() = TODO(\"Not yet implemented\")\n}\n"
        );
    }

    #[test]
    fn empty_entity_is_plain_class() {
        let entity = Entity {
            name: "Marker".to_string(),
            namespace: String::new(),
            type_parameters: vec![],
            properties: vec![],
            constructor_parameters: None,
        };
        assert_eq!(render_entity(&entity, &options()), "class Marker\n");
    }

    #[test]
    fn hierarchy_emits_supertype_and_each_subtype() {
        let hierarchy = ClosedHierarchy {
            name: "Shape".to_string(),
            namespace: String::new(),
            type_parameters: vec![],
            subtypes: vec![
                Subtype {
                    name: "Circle".to_string(),
                    type_parameters: vec![],
                    properties: vec![Property::new("radius", Type::Primitive(PrimitiveKind::Double))],
                    supertype_arguments: vec![],
                    singleton: false,
                },
                Subtype {
                    name: "Empty".to_string(),
                    type_parameters: vec![],
                    properties: vec![],
                    supertype_arguments: vec![],
                    singleton: true,
                },
            ],
        };
        assert_eq!(
            render_hierarchy(&hierarchy, &options()),
            "sealed interface Shape\n\ndata class Circle(\n    val radius: Double,\n) : Shape\n\ndata object Empty : Shape\n"
        );
    }

    #[test]
    fn generic_hierarchy_declares_and_applies_type_parameters() {
        let covariant = Type::TypeParameter {
            name: "A".to_string(),
            bounds: vec![],
            variance: Variance::Covariant,
        };
        let hierarchy = ClosedHierarchy {
            name: "Result".to_string(),
            namespace: String::new(),
            type_parameters: vec![covariant],
            subtypes: vec![
                Subtype {
                    name: "Ok".to_string(),
                    type_parameters: vec![Type::type_parameter("A")],
                    properties: vec![Property::new("value", Type::type_parameter("A"))],
                    supertype_arguments: vec![Type::type_parameter("A")],
                    singleton: false,
                },
                Subtype {
                    name: "Failed".to_string(),
                    type_parameters: vec![],
                    properties: vec![],
                    supertype_arguments: vec![Type::Primitive(PrimitiveKind::Nothing)],
                    singleton: true,
                },
            ],
        };
        assert_eq!(
            render_hierarchy(&hierarchy, &options()),
            "sealed interface Result<out A>\n\ndata class Ok<A>(\n    val value: A,\n) : Result<A>\n\ndata object Failed : Result<Nothing>\n"
        );
    }

    #[test]
    fn enumeration_lists_values() {
        let enumeration = Enumeration {
            name: "Color".to_string(),
            namespace: String::new(),
            values: vec!["Red".to_string(), "Green".to_string()],
        };
        assert_eq!(
            render_enumeration(&enumeration, &options()),
            "enum class Color {\n    Red,\n    Green,\n}\n"
        );
    }
}
