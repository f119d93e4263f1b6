mod test_three_clients_mesh;
