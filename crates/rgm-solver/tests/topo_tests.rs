use super::*;

fn all_orders(graph: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut orders = TopologicalOrders::new(graph);
    let mut out = Vec::new();
    while let Some(order) = orders.current() {
        out.push(order.to_vec());
        orders.advance();
    }
    out
}

#[test]
fn test_unconstrained_orders_keep_first_element_longest() {
    let orders = all_orders(&[vec![], vec![], vec![]]);
    assert_eq!(
        orders,
        vec![
            vec![0, 1, 2],
            vec![0, 2, 1],
            vec![1, 0, 2],
            vec![1, 2, 0],
            vec![2, 0, 1],
            vec![2, 1, 0],
        ]
    );
}

#[test]
fn test_orders_respect_edges() {
    // 0 must precede 1.
    let orders = all_orders(&[vec![1], vec![], vec![]]);
    assert_eq!(orders, vec![vec![0, 2, 1], vec![0, 1, 2], vec![2, 0, 1]]);
}

#[test]
fn test_chain_has_a_single_order() {
    let mut orders = TopologicalOrders::new(&[vec![1], vec![2], vec![]]);
    assert_eq!(orders.current(), Some(&[0, 1, 2][..]));
    assert!(!orders.advance());
    assert!(orders.is_exhausted());
    assert_eq!(orders.current(), None);
    // Stays exhausted.
    assert!(!orders.advance());
}

#[test]
fn test_cycle_has_no_orders() {
    let orders = TopologicalOrders::new(&[vec![1], vec![0]]);
    assert!(orders.is_exhausted());
    assert_eq!(orders.current(), None);
}

#[test]
fn test_reset_restarts_with_new_graph() {
    let mut orders = TopologicalOrders::new(&[vec![]]);
    assert!(!orders.advance());

    orders.reset(&[vec![], vec![]]);
    assert_eq!(orders.current(), Some(&[0, 1][..]));
    assert!(orders.advance());
    assert_eq!(orders.current(), Some(&[1, 0][..]));
    assert!(!orders.advance());
}

#[test]
fn test_least_topological_order() {
    assert_eq!(least_topological_order(&[vec![], vec![], vec![]]), Some(vec![0, 1, 2]));
    // 2 must precede 0.
    assert_eq!(least_topological_order(&[vec![], vec![], vec![0]]), Some(vec![1, 2, 0]));
    assert_eq!(least_topological_order(&[vec![1], vec![0]]), None);
}
