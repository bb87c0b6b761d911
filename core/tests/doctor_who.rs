//! Path queries against the bundled Doctor Who universe.

use std::collections::HashSet;

use pretty_assertions::assert_eq;

use pathgraph_core::universe::{self, APPEARED_IN, REGENERATED_TO};
use pathgraph_core::{
    all_shortest_paths, paths_with_length, shortest_path, single_path_with_length, Expander,
    Graph, GraphError, NodeId, Path, TraversalDirection,
};

fn universe() -> Graph {
    universe::doctor_who().expect("bundled dataset loads")
}

fn lookup(g: &Graph, key: &str, value: &str) -> NodeId {
    g.find_by_property(key, value)
        .unwrap_or_else(|e| panic!("{} = {}: {}", key, value, e))
}

fn titles(g: &Graph, ids: impl IntoIterator<Item = NodeId>) -> Vec<String> {
    let mut names: Vec<String> = ids
        .into_iter()
        .map(|id| g.node(id).unwrap().property("title").unwrap().to_string())
        .collect();
    names.sort();
    names
}

fn sorted(names: &[&str]) -> Vec<String> {
    let mut v: Vec<String> = names.iter().map(|s| s.to_string()).collect();
    v.sort();
    v
}

#[test]
fn rose_tyler_versus_the_daleks() {
    let g = universe();
    let rose = lookup(&g, "name", "Rose Tyler");
    let daleks = lookup(&g, "species", "Dalek");
    let appeared_in = Expander::for_type(&g, APPEARED_IN, TraversalDirection::Both).unwrap();

    let paths: Vec<Path> = paths_with_length(&g, rose, daleks, &appeared_in, 2)
        .unwrap()
        .collect();

    assert_eq!(paths.len(), 7);
    for p in &paths {
        assert_eq!(p.len(), 2);
        assert_eq!(p.start(), rose);
        assert_eq!(p.end(), daleks);
    }
    assert_eq!(
        titles(&g, paths.iter().map(|p| p.nodes()[1])),
        sorted(&[
            "Dalek",
            "Army of Ghosts",
            "Doomsday",
            "The Parting of the Ways",
            "The Stolen Earth",
            "Bad Wolf",
            "Journey's End",
        ])
    );
}

#[test]
fn rose_tyler_versus_the_daleks_in_reverse() {
    let g = universe();
    let rose = lookup(&g, "name", "Rose Tyler");
    let daleks = lookup(&g, "species", "Dalek");
    let appeared_in = Expander::for_type(&g, APPEARED_IN, TraversalDirection::Both).unwrap();

    let forward: HashSet<NodeId> = paths_with_length(&g, rose, daleks, &appeared_in, 2)
        .unwrap()
        .map(|p| p.nodes()[1])
        .collect();
    let backward: HashSet<NodeId> = paths_with_length(&g, daleks, rose, &appeared_in, 2)
        .unwrap()
        .map(|p| p.nodes()[1])
        .collect();
    assert_eq!(forward, backward);
}

#[test]
fn appearances_only_meet_when_ignoring_direction() {
    // Both characters point at the episode, so no outgoing-only route exists
    let g = universe();
    let rose = lookup(&g, "name", "Rose Tyler");
    let daleks = lookup(&g, "species", "Dalek");
    let outgoing = Expander::for_type(&g, APPEARED_IN, TraversalDirection::Outgoing).unwrap();
    assert_eq!(paths_with_length(&g, rose, daleks, &outgoing, 2).unwrap().count(), 0);
}

#[test]
fn master_regenerations_the_easy_way() {
    let g = universe();
    let delgado = lookup(&g, "actor", "Roger Delgado");
    let simm = lookup(&g, "actor", "John Simm");
    let regenerated = Expander::for_type(&g, REGENERATED_TO, TraversalDirection::Outgoing).unwrap();

    let path = shortest_path(&g, delgado, simm, &regenerated, 100)
        .unwrap()
        .expect("Delgado regenerates into Simm");

    let actors_found = path.len() + 1;
    assert_eq!(actors_found, 8);
    assert_eq!(path.start(), delgado);
    assert_eq!(path.end(), simm);
    assert!(path.is_simple());
}

#[test]
fn master_regenerations_do_not_run_backwards() {
    let g = universe();
    let delgado = lookup(&g, "actor", "Roger Delgado");
    let simm = lookup(&g, "actor", "John Simm");
    let regenerated = Expander::for_type(&g, REGENERATED_TO, TraversalDirection::Outgoing).unwrap();

    assert!(shortest_path(&g, simm, delgado, &regenerated, 100).unwrap().is_none());
    let incoming = regenerated.reversed();
    assert_eq!(
        shortest_path(&g, simm, delgado, &incoming, 100).unwrap().unwrap().len(),
        7
    );
}

#[test]
fn master_regenerations_beyond_depth_bound() {
    let g = universe();
    let delgado = lookup(&g, "actor", "Roger Delgado");
    let simm = lookup(&g, "actor", "John Simm");
    let regenerated = Expander::for_type(&g, REGENERATED_TO, TraversalDirection::Outgoing).unwrap();

    assert!(shortest_path(&g, delgado, simm, &regenerated, 6).unwrap().is_none());
    assert!(shortest_path(&g, delgado, simm, &regenerated, 7).unwrap().is_some());
}

#[test]
fn episode_when_tennant_regenerated_to_smith() {
    let g = universe();
    let tennant = lookup(&g, "actor", "David Tennant");
    let smith = lookup(&g, "actor", "Matt Smith");
    let end_of_time = lookup(&g, "title", "The End of Time");
    let appeared_in = Expander::for_type(&g, APPEARED_IN, TraversalDirection::Both).unwrap();

    let path = single_path_with_length(&g, tennant, smith, &appeared_in, 2)
        .unwrap()
        .expect("Tennant and Smith share an episode");
    assert_eq!(path.nodes(), &[tennant, end_of_time, smith]);

    // It is the only shared episode
    assert_eq!(paths_with_length(&g, tennant, smith, &appeared_in, 2).unwrap().count(), 1);

    let shortest = shortest_path(&g, tennant, smith, &appeared_in, 2).unwrap().unwrap();
    assert_eq!(shortest.nodes(), &[tennant, end_of_time, smith]);
}

#[test]
fn all_shortest_paths_between_rose_and_daleks() {
    let g = universe();
    let rose = lookup(&g, "name", "Rose Tyler");
    let daleks = lookup(&g, "species", "Dalek");
    let appeared_in = Expander::for_type(&g, APPEARED_IN, TraversalDirection::Both).unwrap();

    let all = all_shortest_paths(&g, rose, daleks, &appeared_in, 10).unwrap();
    let by_length: HashSet<Path> = paths_with_length(&g, rose, daleks, &appeared_in, 2)
        .unwrap()
        .collect();
    assert_eq!(all.len(), 7);
    assert_eq!(all.into_iter().collect::<HashSet<Path>>(), by_length);
}

#[test]
fn doctor_regenerations_reach_matt_smith() {
    let g = universe();
    let hartnell = lookup(&g, "actor", "William Hartnell");
    let smith = lookup(&g, "actor", "Matt Smith");
    let regenerated = Expander::for_type(&g, REGENERATED_TO, TraversalDirection::Outgoing).unwrap();

    let path = shortest_path(&g, hartnell, smith, &regenerated, 100).unwrap().unwrap();
    assert_eq!(path.len(), 10);
    assert_eq!(
        path.render(&g),
        "(William Hartnell)-[:REGENERATED_TO]->(Patrick Troughton)-[:REGENERATED_TO]->(Jon Pertwee)\
         -[:REGENERATED_TO]->(Tom Baker)-[:REGENERATED_TO]->(Peter Davison)-[:REGENERATED_TO]->(Colin Baker)\
         -[:REGENERATED_TO]->(Sylvester McCoy)-[:REGENERATED_TO]->(Paul McGann)\
         -[:REGENERATED_TO]->(Christopher Eccleston)-[:REGENERATED_TO]->(David Tennant)\
         -[:REGENERATED_TO]->(Matt Smith)"
    );
}

#[test]
fn repeated_queries_agree() {
    let g = universe();
    let rose = lookup(&g, "name", "Rose Tyler");
    let daleks = lookup(&g, "species", "Dalek");
    let appeared_in = Expander::for_type(&g, APPEARED_IN, TraversalDirection::Both).unwrap();

    let first: HashSet<Path> = paths_with_length(&g, rose, daleks, &appeared_in, 2).unwrap().collect();
    let second: HashSet<Path> = paths_with_length(&g, rose, daleks, &appeared_in, 2).unwrap().collect();
    assert_eq!(first, second);
}

#[test]
fn unknown_endpoint_is_not_found() {
    let g = universe();
    let rose = lookup(&g, "name", "Rose Tyler");
    let appeared_in = Expander::for_type(&g, APPEARED_IN, TraversalDirection::Both).unwrap();

    assert!(matches!(
        paths_with_length(&g, rose, 10_000, &appeared_in, 2),
        Err(GraphError::NodeNotFound(10_000))
    ));
    assert!(matches!(
        shortest_path(&g, 10_000, rose, &appeared_in, 100),
        Err(GraphError::NodeNotFound(10_000))
    ));
}

#[test]
fn lookup_failures() {
    let g = universe();
    assert!(matches!(
        g.find_by_property("name", "Captain Jack"),
        Err(GraphError::NoMatch { .. })
    ));
    // Many episodes share a series
    assert!(matches!(
        g.find_by_property("series", "1"),
        Err(GraphError::AmbiguousMatch { .. })
    ));
}
