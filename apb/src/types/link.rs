use crate::macros::vocabulary;

vocabulary! {
	Link => LINK extends [] with crate::link::properties::TABLE : crate::Link;
	Mention => MENTION extends [LINK] : crate::Link;
	/// not part of ActivityStreams, but every fediverse software sends it in `tag`
	Hashtag => HASHTAG extends [LINK] : crate::Link;
}
