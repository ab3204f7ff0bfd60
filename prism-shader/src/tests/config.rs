
//////
//
// Imports
//

// Local imports
use crate::*;



//////
//
// Tests
//

#[test]
fn test_defineListAdd()
{
	let mut defines = DefineList::new();
	assert!(defines.add("USE_SHADOWS", "1"));
	assert!(!defines.add("USE_SHADOWS", "1"));
	assert!(defines.add("USE_SHADOWS", "0"));
	assert_eq!(defines.get("USE_SHADOWS"), Some("0"));
	assert_eq!(defines.len(), 1);

	assert!(defines.remove("USE_SHADOWS"));
	assert!(!defines.remove("USE_SHADOWS"));
	assert!(defines.isEmpty());
}

#[test]
fn test_defineListMerge()
{
	let mut defines = DefineList::new().with("A", "1").with("B", "2");
	let other = DefineList::new().with("B", "3").with("C", "4");

	assert!(defines.addAll(&other));
	assert_eq!(defines.get("B"), Some("3"));
	assert_eq!(defines.get("C"), Some("4"));
	assert!(!defines.addAll(&other));

	// Removal goes by name only
	assert!(defines.removeAll(&DefineList::new().with("A", "whatever")));
	assert!(!defines.contains("A"));
	assert!(!defines.removeAll(&DefineList::new().with("Z", "")));
	assert_eq!(defines.names().collect::<Vec<_>>(), ["B", "C"]);
}

#[test]
fn test_defineListRemoveMatching()
{
	let mut defines: DefineList = [
		("LIGHT_POINT", "1"), ("LIGHT_SPOT", "1"), ("LIGHTING", "1"), ("SHADOW", "1"), ("AB", "1")
	].into_iter().collect();

	// Prefix match
	assert!(defines.removeMatching(0, 6, "LIGHT_"));
	assert!(!defines.contains("LIGHT_POINT"));
	assert!(!defines.contains("LIGHT_SPOT"));
	assert!(defines.contains("LIGHTING"));

	// The compared range gets clipped to the name
	assert!(defines.removeMatching(3, 100, "DOW"));
	assert!(!defines.contains("SHADOW"));

	// Names not longer than the position never match
	assert!(!defines.removeMatching(2, 1, ""));
	assert!(defines.contains("AB"));
	assert_eq!(defines.len(), 2);
}

#[test]
fn test_defineListStructuralEquality()
{
	let a = DefineList::new().with("X", "1").with("Y", "2");
	let b = DefineList::new().with("Y", "2").with("X", "1");
	let c = DefineList::new().with("X", "1").with("Y", "3");

	assert_eq!(a, b);
	assert_eq!(a.digest(), b.digest());
	assert_ne!(a, c);
	assert_ne!(a.digest(), c.digest());
	assert_ne!(DefineList::new().with("AB", "").digest(), DefineList::new().with("A", "B").digest());
}

#[test]
fn test_defineListDisplay() {
	assert_eq!(DefineList::new().with("b", "2").with("a", "1").to_string(), "{a=1, b=2}");
	assert_eq!(DefineList::new().to_string(), "{}");
}

#[test]
fn test_defineListSerde()
{
	let defines = DefineList::new().with("MAX_LIGHTS", "16").with("USE_IBL", "1");
	let yaml = serde_yaml_ng::to_string(&defines).expect("serialization should succeed");
	assert!(yaml.contains("MAX_LIGHTS"));
	let restored: DefineList = serde_yaml_ng::from_str(&yaml).expect("deserialization should succeed");
	assert_eq!(restored, defines);
}

#[test]
fn test_typeConformanceList()
{
	let mut conformances = TypeConformanceList::new();
	conformances.add("Lambert", "IBsdf", 0).add("GGX", "IBsdf", 1);
	assert_eq!(conformances.len(), 2);
	assert_eq!(conformances.find(&TypeConformance::new("GGX", "IBsdf")), Some(1));
	assert_eq!(conformances.find(&TypeConformance::new("GGX", "ILight")), None);

	// Adding again overwrites the id
	conformances.add("GGX", "IBsdf", 7);
	assert_eq!(conformances.find(&TypeConformance::new("GGX", "IBsdf")), Some(7));
	assert_eq!(conformances.len(), 2);

	assert!(conformances.remove("Lambert", "IBsdf"));
	assert!(!conformances.remove("Lambert", "IBsdf"));
	assert_eq!(conformances.iter().map(|(c, id)| (c.to_string(), id)).collect::<Vec<_>>(), [("GGX:IBsdf".into(), 7)]);
}

#[test]
fn test_typeConformanceListEquality()
{
	let a = TypeConformanceList::new().with("A", "I", 0).with("B", "I", 1);
	let b = TypeConformanceList::new().with("B", "I", 1).with("A", "I", 0);
	let c = TypeConformanceList::new().with("A", "I", 0).with("B", "I", 2);

	assert_eq!(a, b);
	assert_eq!(a.digest(), b.digest());
	assert_ne!(a, c);
	assert_ne!(a.digest(), c.digest());
}

#[test]
fn test_typeConformanceListUnion()
{
	let mut program = TypeConformanceList::new().with("A", "I", 0).with("B", "I", 1);
	let group = TypeConformanceList::new().with("B", "I", 5).with("C", "J", 2);
	program.addAll(&group);

	assert_eq!(program.len(), 3);
	assert_eq!(program.find(&TypeConformance::new("B", "I")), Some(5));
	assert_eq!(program.find(&TypeConformance::new("C", "J")), Some(2));
}
