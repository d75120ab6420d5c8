use crate::macros::vocabulary;

use super::OBJECT;

vocabulary! {
	Activity => ACTIVITY extends [OBJECT] with crate::object::activity::properties::TABLE
		: crate::Object, crate::Activity;
	IntransitiveActivity => INTRANSITIVE_ACTIVITY extends [ACTIVITY] : crate::Object, crate::Activity;
	Question => QUESTION extends [INTRANSITIVE_ACTIVITY] with crate::object::activity::question::properties::TABLE
		: crate::Object, crate::Activity, crate::Question;
	Arrive => ARRIVE extends [INTRANSITIVE_ACTIVITY] : crate::Object, crate::Activity;
	Travel => TRAVEL extends [INTRANSITIVE_ACTIVITY] : crate::Object, crate::Activity;

	Accept => ACCEPT extends [ACTIVITY] : crate::Object, crate::Activity;
	TentativeAccept => TENTATIVE_ACCEPT extends [ACCEPT] : crate::Object, crate::Activity;
	Add => ADD extends [ACTIVITY] : crate::Object, crate::Activity;
	Announce => ANNOUNCE extends [ACTIVITY] : crate::Object, crate::Activity;
	Create => CREATE extends [ACTIVITY] : crate::Object, crate::Activity;
	Delete => DELETE extends [ACTIVITY] : crate::Object, crate::Activity;
	Dislike => DISLIKE extends [ACTIVITY] : crate::Object, crate::Activity;
	Flag => FLAG extends [ACTIVITY] : crate::Object, crate::Activity;
	Follow => FOLLOW extends [ACTIVITY] : crate::Object, crate::Activity;
	Ignore => IGNORE extends [ACTIVITY] : crate::Object, crate::Activity;
	Block => BLOCK extends [IGNORE] : crate::Object, crate::Activity;
	Join => JOIN extends [ACTIVITY] : crate::Object, crate::Activity;
	Leave => LEAVE extends [ACTIVITY] : crate::Object, crate::Activity;
	Like => LIKE extends [ACTIVITY] : crate::Object, crate::Activity;
	Listen => LISTEN extends [ACTIVITY] : crate::Object, crate::Activity;
	Move => MOVE extends [ACTIVITY] : crate::Object, crate::Activity;
	Offer => OFFER extends [ACTIVITY] : crate::Object, crate::Activity;
	Invite => INVITE extends [OFFER] : crate::Object, crate::Activity;
	Read => READ extends [ACTIVITY] : crate::Object, crate::Activity;
	Reject => REJECT extends [ACTIVITY] : crate::Object, crate::Activity;
	TentativeReject => TENTATIVE_REJECT extends [REJECT] : crate::Object, crate::Activity;
	Remove => REMOVE extends [ACTIVITY] : crate::Object, crate::Activity;
	Undo => UNDO extends [ACTIVITY] : crate::Object, crate::Activity;
	Update => UPDATE extends [ACTIVITY] : crate::Object, crate::Activity;
	View => VIEW extends [ACTIVITY] : crate::Object, crate::Activity;
}
