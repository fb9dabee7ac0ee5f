/// An authenticated session against the IGDB service.
pub struct IgdbConnection {
    pub client_id: String,
    pub oauth_token: String,
}
