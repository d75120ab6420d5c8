/// declares the properties of a vocabulary trait: their table rows go in a `properties`
/// module next to the trait, and the trait gets default accessors for each of them
///
/// ```ignore
/// properties! {
/// 	pub trait Object : Base {
/// 		attributed_to::attributedTo [many] : Object, Link, Iri;
/// 		content [many, map] : String, LangString;
/// 		published [one] : DateTime;
/// 	}
/// }
/// ```
///
/// kinds are listed in deserialization priority order
macro_rules! properties {
	(
		$(#[$meta:meta])*
		pub trait $trait:ident : $first:path $(, $parent:path)* {
			$( $p:ident $(:: $wire:ident)? [ $($flag:ident),+ ] : $($k:ident),+ ; )*
		}
	) => {
		pub mod properties {
			$(
				$crate::macros::property_def! { $p [$($wire)?] [$($flag),+] [$($k),+] }
			)*

			paste::paste! {
				/// every property declared here, in declaration order
				pub const TABLE: &[&$crate::PropertyDef] = &[ $( &[<$p:upper>] ),* ];
			}
		}

		$(#[$meta])*
		pub trait $trait : $first $(+ $parent)* {
			$(
				$crate::macros::property_accessors! { $p [$($flag),+] [$($k),+] }
			)*
		}

		impl $trait for $crate::Entity {}
	};
}

pub(crate) use properties;

macro_rules! property_def {
	($p:ident [] [$($flag:ident),+] [$($k:ident),+]) => {
		$crate::macros::property_def! { @row $p $p [$($flag),+] [$($k),+] }
	};

	($p:ident [$wire:ident] [$($flag:ident),+] [$($k:ident),+]) => {
		$crate::macros::property_def! { @row $p $wire [$($flag),+] [$($k),+] }
	};

	(@row $p:ident $wire:ident [$functional:ident] [$($k:ident),+]) => {
		paste::paste! {
			pub const [<$p:upper>]: $crate::PropertyDef = $crate::PropertyDef {
				name: stringify!($wire),
				functional: $crate::macros::property_def!(@functional $functional),
				kinds: &[ $( <$crate::kind::$k as $crate::kind::Member>::KIND ),+ ],
				map: None,
			};
		}
	};

	(@row $p:ident $wire:ident [$functional:ident, map] [$($k:ident),+]) => {
		paste::paste! {
			pub const [<$p:upper>]: $crate::PropertyDef = $crate::PropertyDef {
				name: stringify!($wire),
				functional: $crate::macros::property_def!(@functional $functional),
				kinds: &[ $( <$crate::kind::$k as $crate::kind::Member>::KIND ),+ ],
				map: Some(concat!(stringify!($wire), "Map")),
			};
		}
	};

	(@functional one) => { true };
	(@functional many) => { false };
}

pub(crate) use property_def;

macro_rules! property_accessors {
	// single valued
	($p:ident [one $(, $map:ident)?] [$($k:ident),+]) => {
		paste::paste! {
			$(
				fn [<is_ $p _ $k:snake>](&self) -> bool {
					self.entity().node(&properties::[<$p:upper>]).is::<$crate::kind::$k>()
				}

				fn [<get_ $p _ $k:snake>](&self) -> Option<<$crate::kind::$k as $crate::kind::Member>::Ref<'_>> {
					self.entity().node(&properties::[<$p:upper>]).get::<$crate::kind::$k>()
				}

				fn [<set_ $p _ $k:snake>](&mut self, value: <$crate::kind::$k as $crate::kind::Member>::Value) {
					self.entity_mut().node_mut(&properties::[<$p:upper>]).set::<$crate::kind::$k>(value)
				}
			)+

			fn $p(&self) -> &$crate::Node {
				self.entity().node(&properties::[<$p:upper>])
			}

			fn [<has_unknown_ $p>](&self) -> bool {
				self.entity().node(&properties::[<$p:upper>]).is_unknown()
			}

			fn [<get_unknown_ $p>](&self) -> Option<&serde_json::Value> {
				self.entity().node(&properties::[<$p:upper>]).unknown()
			}

			fn [<set_unknown_ $p>](&mut self, value: serde_json::Value) {
				self.entity_mut().node_mut(&properties::[<$p:upper>]).set_unknown(value)
			}

			fn [<clear_ $p>](&mut self) {
				self.entity_mut().clear(&properties::[<$p:upper>])
			}
		}

		$( $crate::macros::property_accessors! { @$map $p } )?
	};

	// multi valued, indexes past the end are programming errors and panic
	($p:ident [many $(, $map:ident)?] [$($k:ident),+]) => {
		paste::paste! {
			$(
				fn [<is_ $p _ $k:snake>](&self, index: usize) -> bool {
					self.entity().nodes(&properties::[<$p:upper>])
						.get(index)
						.is_some_and(|n| n.is::<$crate::kind::$k>())
				}

				fn [<get_ $p _ $k:snake>](&self, index: usize) -> Option<<$crate::kind::$k as $crate::kind::Member>::Ref<'_>> {
					self.entity().nodes(&properties::[<$p:upper>])
						.get(index)?
						.get::<$crate::kind::$k>()
				}

				fn [<set_ $p _ $k:snake>](&mut self, index: usize, value: <$crate::kind::$k as $crate::kind::Member>::Value) {
					self.entity_mut().nodes_mut(&properties::[<$p:upper>])[index] = $crate::Node::of::<$crate::kind::$k>(value);
				}

				fn [<append_ $p _ $k:snake>](&mut self, value: <$crate::kind::$k as $crate::kind::Member>::Value) {
					self.entity_mut().nodes_mut(&properties::[<$p:upper>]).push($crate::Node::of::<$crate::kind::$k>(value));
				}

				fn [<prepend_ $p _ $k:snake>](&mut self, value: <$crate::kind::$k as $crate::kind::Member>::Value) {
					self.entity_mut().nodes_mut(&properties::[<$p:upper>]).insert(0, $crate::Node::of::<$crate::kind::$k>(value));
				}

				/// removes the value at `index` only if it holds this kind
				fn [<remove_ $p _ $k:snake>](&mut self, index: usize) -> bool {
					let nodes = self.entity_mut().nodes_mut(&properties::[<$p:upper>]);
					if nodes.get(index).is_some_and(|n| n.is::<$crate::kind::$k>()) {
						nodes.remove(index);
						true
					} else {
						false
					}
				}
			)+

			fn $p(&self) -> &[$crate::Node] {
				self.entity().nodes(&properties::[<$p:upper>])
			}

			fn [<$p _len>](&self) -> usize {
				self.entity().nodes(&properties::[<$p:upper>]).len()
			}

			fn [<has_unknown_ $p>](&self, index: usize) -> bool {
				self.entity().nodes(&properties::[<$p:upper>])
					.get(index)
					.is_some_and($crate::Node::is_unknown)
			}

			fn [<get_unknown_ $p>](&self, index: usize) -> Option<&serde_json::Value> {
				self.entity().nodes(&properties::[<$p:upper>]).get(index)?.unknown()
			}

			fn [<set_unknown_ $p>](&mut self, index: usize, value: serde_json::Value) {
				self.entity_mut().nodes_mut(&properties::[<$p:upper>])[index].set_unknown(value)
			}

			fn [<append_unknown_ $p>](&mut self, value: serde_json::Value) {
				self.entity_mut().nodes_mut(&properties::[<$p:upper>]).push($crate::Node::Unknown(value))
			}

			fn [<remove_ $p>](&mut self, index: usize) -> $crate::Node {
				self.entity_mut().nodes_mut(&properties::[<$p:upper>]).remove(index)
			}

			fn [<swap_ $p>](&mut self, a: usize, b: usize) {
				self.entity_mut().nodes_mut(&properties::[<$p:upper>]).swap(a, b)
			}

			fn [<sort_ $p>](&mut self) {
				self.entity_mut().sort(&properties::[<$p:upper>])
			}

			fn [<clear_ $p>](&mut self) {
				self.entity_mut().clear(&properties::[<$p:upper>])
			}
		}

		$( $crate::macros::property_accessors! { @$map $p } )?
	};

	(@map $p:ident) => {
		paste::paste! {
			fn [<$p _map_languages>](&self) -> Vec<&str> {
				self.entity().language_map(&properties::[<$p:upper>])
					.map(|m| m.keys().map(|k| k.as_str()).collect())
					.unwrap_or_default()
			}

			fn [<get_ $p _map>](&self, language: &str) -> Option<&str> {
				self.entity().language_map(&properties::[<$p:upper>])?
					.get(language)
					.map(|x| x.as_str())
			}

			fn [<set_ $p _map>](&mut self, language: &str, value: &str) {
				self.entity_mut().language_map_mut(&properties::[<$p:upper>])
					.insert(language.to_string(), value.to_string());
			}

			fn [<$p _map>](&self) -> Option<&$crate::value::LangMap> {
				self.entity().language_map(&properties::[<$p:upper>])
			}

			fn [<clear_ $p _map>](&mut self) {
				self.entity_mut().set_language_map(&properties::[<$p:upper>], None)
			}
		}
	};
}

pub(crate) use property_accessors;

/// declares vocabulary types: their static definition and a typed wrapper over [crate::Entity]
///
/// ```ignore
/// vocabulary! {
/// 	Note => NOTE extends [OBJECT] : crate::Object;
/// 	Create => CREATE extends [ACTIVITY] : crate::Object, crate::Activity;
/// }
/// ```
macro_rules! vocabulary {
	(
		$(
			$(#[$meta:meta])*
			$name:ident => $def:ident extends [$($parent:path),*] $(with $props:path)? : $($tr:path),* ;
		)+
	) => {
		$(
			pub static $def: $crate::TypeDef = $crate::TypeDef {
				name: stringify!($name),
				extends: &[$(&$parent),*],
				properties: $crate::macros::vocabulary!(@props $($props)?),
			};

			$(#[$meta])*
			#[derive(Debug, Clone, PartialEq)]
			pub struct $name($crate::Entity);

			impl $name {
				pub fn new() -> Self {
					$name($crate::Entity::new(&$def))
				}

				/// reads a json document as this type, whatever its `type` says
				pub fn deserialize(value: &serde_json::Value, registry: &$crate::Registry) -> $crate::Result<Self> {
					$crate::Entity::deserialize_as(&$def, value, registry).map($name)
				}

				pub fn definition() -> &'static $crate::TypeDef {
					&$def
				}

				pub fn into_entity(self) -> $crate::Entity {
					self.0
				}
			}

			impl Default for $name {
				fn default() -> Self {
					$name::new()
				}
			}

			impl $crate::Base for $name {
				fn entity(&self) -> &$crate::Entity {
					&self.0
				}

				fn entity_mut(&mut self) -> &mut $crate::Entity {
					&mut self.0
				}
			}

			impl From<$name> for $crate::Entity {
				fn from(value: $name) -> Self {
					value.0
				}
			}

			impl TryFrom<$crate::Entity> for $name {
				type Error = $crate::VocabError;

				fn try_from(value: $crate::Entity) -> Result<Self, Self::Error> {
					if value.definition().satisfies(stringify!($name)) {
						Ok($name(value))
					} else {
						Err($crate::VocabError::Incompatible {
							expected: stringify!($name),
							found: value.definition().name,
						})
					}
				}
			}

			$( impl $tr for $name {} )*
		)+
	};

	(@props) => { &[] };
	(@props $props:path) => { $props };
}

pub(crate) use vocabulary;
